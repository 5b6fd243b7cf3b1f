use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use std::cell::RefCell;

use memoria_shared::{Element, FocusState, ViewConfig, ViewPreset};

use crate::data::{self, RosterState};
use crate::grid::TierGrid;
use crate::header::Header;
use crate::scroll;

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Newtype wrappers so same-typed signals get distinct Leptos context slots.
#[derive(Clone, Copy)]
pub(crate) struct RosterSignal(pub RwSignal<RosterState>);
#[derive(Clone, Copy)]
pub(crate) struct SearchName(pub RwSignal<String>);
#[derive(Clone, Copy)]
pub(crate) struct SearchStyle(pub RwSignal<String>);
#[derive(Clone, Copy)]
pub(crate) struct ElementFilter(pub RwSignal<Option<Element>>);
#[derive(Clone, Copy)]
pub(crate) struct FocusSignal(pub RwSignal<FocusState>);
#[derive(Clone, Copy)]
pub(crate) struct PresetSetting(pub RwSignal<ViewPreset>);
#[derive(Clone, Copy)]
pub(crate) struct CurrentViewConfig(pub Memo<ViewConfig>);

use gloo_storage::Storage;

const SETTINGS_KEY: &str = "memoria_settings";

#[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub view_preset: ViewPreset,
    pub element: Option<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    ClearFocus { blur: bool },
    FocusSearch,
    Ignore,
}

/// Global shortcut for a key press. Typing in a form control only reacts to Escape.
fn key_action(key: &str, target_tag: &str) -> KeyAction {
    let in_control = matches!(target_tag, "INPUT" | "TEXTAREA" | "SELECT");
    match key {
        "Escape" => KeyAction::ClearFocus { blur: in_control },
        "/" if !in_control => KeyAction::FocusSearch,
        _ => KeyAction::Ignore,
    }
}

/// Root application component. Loads the roster and provides shared signals via context.
#[component]
pub fn App() -> impl IntoView {
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();

    let roster: RwSignal<RosterState> = RwSignal::new(RosterState::Loading);
    let search_name: RwSignal<String> = RwSignal::new(String::new());
    let search_style: RwSignal<String> = RwSignal::new(String::new());
    let element_filter: RwSignal<Option<Element>> = RwSignal::new(saved.element);
    let focus: RwSignal<FocusState> = RwSignal::new(FocusState::default());
    let view_preset: RwSignal<ViewPreset> = RwSignal::new(saved.view_preset);
    let view_config = Memo::new(move |_| view_preset.get().config());

    provide_context(RosterSignal(roster));
    provide_context(SearchName(search_name));
    provide_context(SearchStyle(search_style));
    provide_context(ElementFilter(element_filter));
    provide_context(FocusSignal(focus));
    provide_context(PresetSetting(view_preset));
    provide_context(CurrentViewConfig(view_config));

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            view_preset: view_preset.get(),
            element: element_filter.get(),
        };
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &settings);
    });

    Effect::new(move || {
        spawn_local(async move {
            match data::fetch_roster().await {
                Ok(loaded) => roster.set(RosterState::Ready(loaded)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Roster load failed: {e}").into());
                    roster.set(RosterState::Failed(e));
                }
            }
        });
    });

    // Search-driven focus. Re-runs only when the search inputs (or the roster) change,
    // so a card click keeps its focus until the next edit.
    Effect::new(move || {
        let name = search_name.get();
        let style = search_style.get();
        let request = roster.with(|state| {
            let roster = state.roster()?;
            focus
                .try_update(|f| f.on_search(roster, &name, &style))
                .flatten()
        });
        if let Some(request) = request {
            scroll::scroll_to(request);
        }
    });

    // Global keyboard shortcuts
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let target = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok());
                let target_tag = target.as_ref().map(|el| el.tag_name()).unwrap_or_default();

                match key_action(&e.key(), &target_tag) {
                    KeyAction::ClearFocus { blur } => {
                        if blur && let Some(el) = target {
                            el.blur().ok();
                        }
                        focus.update(|f| f.on_background_click());
                    }
                    KeyAction::FocusSearch => {
                        e.prevent_default();
                        let Some(window) = web_sys::window() else {
                            return;
                        };
                        let Some(doc) = window.document() else {
                            return;
                        };
                        if let Some(el) = doc.query_selector("[data-search-input]").ok().flatten()
                            && let Ok(input) = el.dyn_into::<web_sys::HtmlElement>()
                        {
                            input.focus().ok();
                        }
                    }
                    KeyAction::Ignore => {}
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    let page_style = move || {
        let palette = view_config.get().palette;
        format!(
            "height: 100vh; width: 100vw; display: flex; flex-direction: column; overflow: hidden; position: relative; background: linear-gradient(135deg, {} 0%, #161b2e 55%, #251e3e 100%); color: {}; font-family: 'Inter', system-ui, sans-serif;",
            palette.background, palette.text
        )
    };

    view! {
        <main style=page_style>
            <Header />
            {move || match roster.get() {
                RosterState::Loading => view! { <StatusNotice message="Loading roster...".to_string() /> }.into_any(),
                RosterState::Failed(e) => view! { <StatusNotice message=format!("Could not load the tier list ({e}).") /> }.into_any(),
                RosterState::Ready(_) => view! { <TierGrid /> }.into_any(),
            }}
        </main>
    }
}

#[component]
fn StatusNotice(message: String) -> impl IntoView {
    let CurrentViewConfig(view_config) = expect_context();
    view! {
        <div style=move || format!(
            "flex: 1; display: flex; align-items: center; justify-content: center; font-family: 'JetBrains Mono', monospace; font-size: 0.85rem; letter-spacing: 0.2em; text-transform: uppercase; color: {};",
            view_config.get().palette.muted
        )>
            {message}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyAction, Settings, key_action};
    use memoria_shared::{Element, ViewPreset};

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let parsed: Settings = serde_json::from_str("{}").expect("empty settings");
        assert_eq!(parsed, Settings::default());
        assert_eq!(parsed.view_preset, ViewPreset::Standard);
        assert_eq!(parsed.element, None);
    }

    #[test]
    fn escape_clears_focus_and_blurs_form_controls() {
        assert_eq!(
            key_action("Escape", "INPUT"),
            KeyAction::ClearFocus { blur: true }
        );
        assert_eq!(
            key_action("Escape", "SELECT"),
            KeyAction::ClearFocus { blur: true }
        );
        assert_eq!(
            key_action("Escape", "DIV"),
            KeyAction::ClearFocus { blur: false }
        );
    }

    #[test]
    fn slash_focuses_search_unless_typing() {
        assert_eq!(key_action("/", "BODY"), KeyAction::FocusSearch);
        assert_eq!(key_action("/", "INPUT"), KeyAction::Ignore);
        assert_eq!(key_action("a", "BODY"), KeyAction::Ignore);
    }

    #[test]
    fn settings_roundtrip_preset_and_element() {
        let settings = Settings {
            view_preset: ViewPreset::Compact,
            element: Some(Element::Thunder),
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(json, r#"{"view_preset":"Compact","element":"Thunder"}"#);
        let back: Settings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
    }
}
