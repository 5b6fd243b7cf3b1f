use leptos::prelude::*;

use memoria_shared::colors::{label_color, with_alpha};
use memoria_shared::{Entry, ViewConfig};

use crate::app::{FocusSignal, RosterSignal};
use crate::scroll;

/// Share of the card height taken by the portrait; the caption gets the rest.
const IMAGE_SHARE: f64 = 0.72;

/// Focus-dependent part of a card's style.
fn card_state_style(focused: bool, dimmed: bool, hovered: bool, accent: &str) -> String {
    if focused {
        format!(
            "transform: scale(1.1); z-index: 50; opacity: 1; filter: none; box-shadow: 0 0 30px {}, 0 0 0 2px #ffffff;",
            with_alpha(accent, 0.6)
        )
    } else if dimmed {
        "transform: none; z-index: 0; opacity: 0.3; filter: grayscale(100%) blur(1px); box-shadow: none;"
            .to_string()
    } else if hovered {
        format!(
            "transform: translateY(-4px); z-index: 20; opacity: 1; filter: none; box-shadow: 0 10px 25px {};",
            with_alpha(accent, 0.3)
        )
    } else {
        "transform: none; z-index: 0; opacity: 1; filter: none; box-shadow: 0 4px 12px rgba(0,0,0,0.4);"
            .to_string()
    }
}

/// One roster entry. Clicking toggles focus on its variant; the cycle button
/// steps through duplicates of the focused variant.
#[component]
pub fn Card(entry: Entry, cfg: ViewConfig) -> impl IntoView {
    let FocusSignal(focus) = expect_context();
    let RosterSignal(roster) = expect_context();

    let hovered = RwSignal::new(false);
    let image_failed = RwSignal::new(false);

    let accent = entry.accent().to_string();
    let image_path = entry.image_path();
    let rank_index = entry.rank_index;
    let palette = cfg.palette;
    let image_height = (cfg.scaled(cfg.card_height) * IMAGE_SHARE).round();
    let entry = StoredValue::new(entry);

    let focused = Memo::new(move |_| entry.with_value(|e| focus.with(|f| f.focus().highlights(e))));
    let dimmed = Memo::new(move |_| entry.with_value(|e| focus.with(|f| f.focus().dims(e))));
    let can_cycle = Memo::new(move |_| {
        entry.with_value(|e| {
            focus.with(|f| {
                roster.with(|state| state.roster().is_some_and(|r| f.can_cycle(r, e)))
            })
        })
    });

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        entry.with_value(|e| focus.update(|f| f.on_card_click(e)));
    };
    let on_cycle = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let request = entry.with_value(|e| {
            focus.with_untracked(|f| {
                roster.with_untracked(|state| state.roster().and_then(|r| f.on_cycle(r, e)))
            })
        });
        if let Some(request) = request {
            scroll::scroll_to(request);
        }
    };

    let card_style = {
        let accent = accent.clone();
        move || {
            format!(
                "position: relative; width: {}; height: {}; flex-shrink: 0; display: flex; flex-direction: column; overflow: hidden; cursor: pointer; border-radius: 8px; border: 1px solid {}; background: {}; transition: transform 0.3s, opacity 0.3s, filter 0.3s, box-shadow 0.3s; {}",
                cfg.px(cfg.card_width),
                cfg.px(cfg.card_height),
                with_alpha(&accent, 0.35),
                palette.card,
                card_state_style(focused.get(), dimmed.get(), hovered.get(), &accent)
            )
        }
    };

    let name = entry.with_value(|e| e.name.clone());
    let version = entry.with_value(|e| e.version.clone());
    let alt = format!("{name} {version}");
    let version_color = label_color(&accent).to_string();

    let portrait = move || match image_path.clone() {
        Some(src) if !image_failed.get() => view! {
            <img
                src=src
                alt=alt.clone()
                loading="lazy"
                style="width: 100%; height: 100%; object-fit: cover; object-position: top; pointer-events: none;"
                on:error=move |_| image_failed.set(true)
            />
        }
        .into_any(),
        _ => view! {
            <div style="width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; font-size: 3rem; font-weight: 900; color: rgba(255,255,255,0.1); user-select: none;">
                "?"
            </div>
        }
        .into_any(),
    };

    view! {
        <div
            data-rank-index=rank_index.to_string()
            title=format!("{name} ({version})")
            style=card_style
            on:click=on_click
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            <div style=format!(
                "position: relative; height: {image_height}px; flex-shrink: 0; overflow: hidden; background: {};",
                palette.image_well
            )>
                {portrait}
                <div style=format!(
                    "position: absolute; top: 8px; left: 8px; width: 10px; height: 10px; border-radius: 50%; background: {accent}; box-shadow: 0 0 8px {accent};"
                ) />
                {move || can_cycle.get().then(|| view! {
                    <button
                        title="Next duplicate"
                        style="position: absolute; top: 6px; right: 6px; width: 28px; height: 28px; display: flex; align-items: center; justify-content: center; border-radius: 50%; border: 1px solid rgba(255,255,255,0.3); background: rgba(0,0,0,0.6); color: #ffffff; font-size: 0.8rem; cursor: pointer;"
                        on:click=on_cycle
                    >
                        "⏭"
                    </button>
                })}
            </div>
            <div style=format!(
                "flex: 1; display: flex; flex-direction: column; justify-content: center; align-items: center; gap: 2px; padding: 4px 8px; text-align: center; background: {}; border-top: 1px solid rgba(255,255,255,0.05);",
                palette.card_caption
            )>
                <span style=format!(
                    "font-size: 0.68rem; font-weight: 700; letter-spacing: 0.05em; text-transform: uppercase; line-height: 1.1; color: {version_color}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; max-width: 100%;"
                )>
                    {version.clone()}
                </span>
                <span style="font-size: 0.9rem; font-weight: 900; line-height: 1.1; color: #ffffff; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; max-width: 100%;">
                    {name.clone()}
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::card_state_style;

    #[test]
    fn focused_card_glows_in_its_accent() {
        let style = card_state_style(true, false, false, "#ea9999");
        assert!(style.contains("scale(1.1)"));
        assert!(style.contains("rgba(234,153,153,0.6)"));
        assert!(style.contains("z-index: 50"));
    }

    #[test]
    fn dimmed_card_fades_out() {
        let style = card_state_style(false, true, true, "#ea9999");
        assert!(style.contains("opacity: 0.3"));
        assert!(style.contains("grayscale(100%)"));
        assert!(!style.contains("translateY"));
    }

    #[test]
    fn hover_only_applies_to_neutral_cards() {
        assert!(card_state_style(false, false, true, "#a4c2f4").contains("translateY(-4px)"));
        assert!(card_state_style(true, false, true, "#a4c2f4").contains("scale(1.1)"));
        assert!(card_state_style(false, false, false, "#a4c2f4").contains("opacity: 1"));
    }
}
