use leptos::prelude::*;
use wasm_bindgen::JsCast;

use memoria_shared::colors::with_alpha;
use memoria_shared::{ELEMENTS, Element, VIEW_PRESETS, ViewPreset};

use crate::app::{
    CurrentViewConfig, ElementFilter, PresetSetting, RosterSignal, SearchName, SearchStyle,
};

const NAMES_LIST_ID: &str = "names-list";

/// Title block plus the filter bar.
#[component]
pub fn Header() -> impl IntoView {
    let RosterSignal(roster) = expect_context();
    let CurrentViewConfig(view_config) = expect_context();

    let version = Memo::new(move |_| {
        roster.with(|state| {
            state
                .roster()
                .and_then(|r| r.version())
                .map(|v| format!("Ver {v}"))
        })
    });

    let header_style = move || {
        let cfg = view_config.get();
        format!(
            "height: {}; flex-shrink: 0; display: flex; align-items: center; gap: 32px; padding: 0 32px; position: relative; z-index: 50; background: {}; border-bottom: 1px solid rgba(255,255,255,0.1); box-shadow: 0 10px 30px rgba(0,0,0,0.5);",
            cfg.px(96),
            with_alpha(cfg.palette.header, 0.8)
        )
    };
    let stripe_style = move || {
        let palette = view_config.get().palette;
        format!(
            "position: absolute; top: 0; left: 0; right: 0; height: 2px; background: linear-gradient(90deg, {}, {});",
            palette.accent, palette.accent_secondary
        )
    };
    let title_style = move || {
        let accent = view_config.get().palette.accent;
        format!(
            "font-size: 2.25rem; font-weight: 900; font-style: italic; letter-spacing: -0.05em; color: {accent}; text-shadow: 0 0 20px {};",
            with_alpha(accent, 0.3)
        )
    };

    view! {
        <header style=header_style>
            <div style=stripe_style />
            <div style="display: flex; flex-direction: column; justify-content: center; user-select: none;">
                <h1 style="margin: 0; display: flex; align-items: baseline; gap: 12px;">
                    <span style=title_style>"MEMORIA"</span>
                    <span style="font-size: 2.25rem; font-weight: 900; font-style: italic; letter-spacing: -0.05em; color: #ffffff;">"TIER LIST"</span>
                </h1>
                {move || version.get().map(|label| view! {
                    <span style="font-family: 'JetBrains Mono', monospace; font-size: 0.72rem; color: #9ca3af; letter-spacing: 0.4em; text-transform: uppercase; font-weight: 700;">{label}</span>
                })}
            </div>
            <FilterBar />
        </header>
    }
}

/// Name search with suggestions, element filter, style filter and view preset.
#[component]
fn FilterBar() -> impl IntoView {
    let RosterSignal(roster) = expect_context();
    let SearchName(search_name) = expect_context();
    let SearchStyle(search_style) = expect_context();
    let ElementFilter(element_filter) = expect_context();
    let PresetSetting(view_preset) = expect_context();
    let CurrentViewConfig(view_config) = expect_context();

    let unique_names = Memo::new(move |_| {
        roster.with(|state| state.roster().map(|r| r.unique_names()).unwrap_or_default())
    });
    let available_styles = Memo::new(move |_| {
        let name = search_name.get();
        roster.with(|state| {
            state
                .roster()
                .map(|r| r.styles_for_name(&name))
                .unwrap_or_default()
        })
    });
    let style_disabled =
        move || search_name.with(|n| n.is_empty()) || available_styles.with(|s| s.is_empty());

    let on_name_input = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        search_name.set(input.value());
        search_style.set(String::new());
    };
    let on_element_change = move |e: leptos::ev::Event| {
        if let Some(value) = select_value(&e) {
            element_filter.set(Element::from_label(&value));
        }
    };
    let on_style_change = move |e: leptos::ev::Event| {
        if let Some(value) = select_value(&e) {
            search_style.set(value);
        }
    };
    let on_preset_change = move |e: leptos::ev::Event| {
        if let Some(preset) = select_value(&e).and_then(|v| ViewPreset::from_label(&v)) {
            view_preset.set(preset);
        }
    };

    let bar_style = move || {
        let palette = view_config.get().palette;
        format!(
            "margin-left: auto; display: flex; align-items: center; height: 48px; background: {}; border: 1px solid rgba(255,255,255,0.1); border-radius: 6px; overflow: hidden; box-shadow: 0 4px 16px rgba(0,0,0,0.4);",
            palette.control
        )
    };
    let select_style = move || {
        let palette = view_config.get().palette;
        format!(
            "height: 100%; padding: 0 16px; background: {}; color: #d1d5db; border: none; border-left: 1px solid rgba(255,255,255,0.1); outline: none; font-size: 0.85rem; font-weight: 700; text-transform: uppercase; cursor: pointer;",
            palette.control
        )
    };

    view! {
        <div style=bar_style>
            <input
                data-search-input=""
                list=NAMES_LIST_ID
                type="text"
                placeholder="SEARCH IDENTITY..."
                style="width: 320px; height: 100%; padding: 0 16px; background: transparent; border: none; outline: none; color: #e5e7eb; font-size: 1rem; font-weight: 700; letter-spacing: 0.1em; text-transform: uppercase;"
                prop:value=move || search_name.get()
                on:input=on_name_input
            />
            <datalist id=NAMES_LIST_ID>
                {move || unique_names.get().into_iter().map(|name| view! { <option value=name /> }).collect::<Vec<_>>()}
            </datalist>
            <select style=select_style on:change=on_element_change>
                <option value="" selected=move || element_filter.get().is_none()>"ALL ELEMENTS"</option>
                {ELEMENTS
                    .into_iter()
                    .map(|element| view! {
                        <option value=element.label() selected=move || element_filter.get() == Some(element)>
                            {element.label()}
                        </option>
                    })
                    .collect::<Vec<_>>()}
            </select>
            <select
                style=move || format!("{} width: 200px;", select_style())
                disabled=style_disabled
                prop:value=move || search_style.get()
                on:change=on_style_change
            >
                <option value="">"ALL STYLES"</option>
                {move || available_styles.get().into_iter().map(|style| {
                    let label = style.clone();
                    view! { <option value=style>{label}</option> }
                }).collect::<Vec<_>>()}
            </select>
            <select style=select_style on:change=on_preset_change title="View size">
                {VIEW_PRESETS
                    .into_iter()
                    .map(|preset| view! {
                        <option value=preset.label() selected=move || view_preset.get() == preset>
                            {preset.label()}
                        </option>
                    })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}

fn select_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let select = target.dyn_into::<web_sys::HtmlSelectElement>().ok()?;
    Some(select.value())
}
