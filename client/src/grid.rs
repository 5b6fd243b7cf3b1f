use leptos::prelude::*;

use memoria_shared::colors::with_alpha;
use memoria_shared::role::role_accent;
use memoria_shared::tier::{tier_caption, tier_numeral};
use memoria_shared::{GridCell, GridRow, ROLE_COLUMNS, ViewConfig};

use crate::app::{CurrentViewConfig, ElementFilter, FocusSignal, RosterSignal};
use crate::card::Card;

/// The tier × role grid. Only the element filter changes which cards exist;
/// search and clicks only change focus.
#[component]
pub fn TierGrid() -> impl IntoView {
    let RosterSignal(roster) = expect_context();
    let ElementFilter(element_filter) = expect_context();
    let FocusSignal(focus) = expect_context();
    let CurrentViewConfig(view_config) = expect_context();

    let grid = Memo::new(move |_| {
        let filter = element_filter.get();
        roster.with(|state| state.roster().map(|r| r.build_grid(filter)))
    });

    let on_background_click = move |_| {
        focus.update(|f| f.on_background_click());
    };

    view! {
        <div
            class="scrollbar-thin"
            style="flex: 1; overflow: auto; position: relative; z-index: 10;"
            on:click=on_background_click
        >
            <div style="display: inline-block; min-width: max-content; padding-bottom: 160px;">
                <ColumnHeaders />
                {move || {
                    let cfg = view_config.get();
                    grid.get()
                        .map(|grid| {
                            grid.rows()
                                .iter()
                                .enumerate()
                                .map(|(idx, row)| view! { <TierRow row={row.clone()} striped={idx % 2 == 0} cfg=cfg /> })
                                .collect::<Vec<_>>()
                        })
                        .unwrap_or_default()
                }}
            </div>
        </div>
    }
}

#[component]
fn ColumnHeaders() -> impl IntoView {
    let CurrentViewConfig(view_config) = expect_context();

    view! {
        {move || {
        let cfg = view_config.get();
        let palette = cfg.palette;
        view! {
            <div style=format!(
                "display: flex; position: sticky; top: 0; z-index: 40; background: {}; border-bottom: 1px solid rgba(255,255,255,0.1); box-shadow: 0 10px 30px rgba(0,0,0,0.6);",
                with_alpha(palette.background, 0.95)
            )>
                <div style=format!(
                    "position: sticky; left: 0; z-index: 50; width: {}; height: {}; flex-shrink: 0; display: flex; align-items: center; justify-content: center; background: {}; border-right: 1px solid rgba(255,255,255,0.1);",
                    cfg.px(cfg.tier_label_width), cfg.px(cfg.header_height), palette.background
                )>
                    <span style=format!(
                        "font-size: 1.875rem; font-weight: 900; font-style: italic; letter-spacing: 0.2em; color: {};",
                        palette.tier_label
                    )>"TIER"</span>
                </div>
                {ROLE_COLUMNS
                    .iter()
                    .map(|col| {
                        let accent = role_accent(col.key);
                        view! {
                            <div style=format!(
                                "width: {}px; height: {}; flex-shrink: 0; position: relative; display: flex; align-items: center; justify-content: center; overflow: hidden; border-right: 1px solid rgba(255,255,255,0.05); background: linear-gradient(180deg, rgba(255,255,255,0.03) 0%, rgba(0,0,0,0.2) 100%);",
                                cfg.column_width(col), cfg.px(cfg.header_height)
                            )>
                                <div style=format!(
                                    "position: absolute; bottom: 0; left: 0; right: 0; height: 3px; background: {accent}; box-shadow: 0 0 15px {accent};"
                                ) />
                                <span style="font-size: 1.25rem; font-weight: 900; letter-spacing: 0.1em; text-transform: uppercase; color: #f3f4f6;">
                                    {col.title}
                                </span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        }
        }}
    }
}

#[component]
fn TierRow(row: GridRow, striped: bool, cfg: ViewConfig) -> impl IntoView {
    let palette = cfg.palette;
    let numeral = tier_numeral(row.tier);
    let caption = tier_caption(row.tier);
    let row_bg = if striped {
        "rgba(255,255,255,0.02)"
    } else {
        "transparent"
    };

    view! {
        <div style=format!("display: flex; border-bottom: 1px solid rgba(255,255,255,0.05); background: {row_bg};")>
            <div style=format!(
                "position: sticky; left: 0; z-index: 30; width: {}; flex-shrink: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 16px; border-right: 1px solid rgba(255,255,255,0.1); background: linear-gradient(135deg, #131221 0%, {} 100%); box-shadow: 5px 0 30px rgba(0,0,0,0.5);",
                cfg.px(cfg.tier_label_width), palette.background
            )>
                <span style=format!(
                    "font-size: {}; font-weight: 900; font-style: italic; letter-spacing: -0.05em; line-height: 0.8; padding-right: 0.5rem; user-select: none; background: linear-gradient(180deg, #ffffff 0%, {} 100%); -webkit-background-clip: text; -webkit-text-fill-color: transparent; filter: drop-shadow(0 0 20px {});",
                    cfg.px(72), palette.accent, with_alpha(palette.accent, 0.2)
                )>
                    {numeral.to_string()}
                </span>
                {caption.map(|caption| view! {
                    <span style="margin-top: 16px; padding: 4px 12px; font-size: 0.75rem; font-weight: 700; letter-spacing: 0.2em; text-transform: uppercase; color: #6b7280; background: rgba(0,0,0,0.4); border: 1px solid rgba(255,255,255,0.1); border-radius: 4px;">
                        {caption.to_string()}
                    </span>
                })}
            </div>
            {row.cells
                .into_iter()
                .zip(ROLE_COLUMNS.iter())
                .map(|(cell, col)| view! {
                    <div style=format!(
                        "width: {}px; flex-shrink: 0; position: relative; border-right: 1px solid rgba(255,255,255,0.05);",
                        cfg.column_width(col)
                    )>
                        <Cell cell=cell cfg=cfg />
                    </div>
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn Cell(cell: GridCell, cfg: ViewConfig) -> impl IntoView {
    if cell.is_empty() {
        return view! {
            <div style=format!("width: 100%; height: 100%; min-height: {};", cfg.px(cfg.empty_cell_min_height)) />
        }
        .into_any();
    }

    view! {
        <div style=format!(
            "display: flex; flex-direction: column; justify-content: flex-start; gap: {}; padding: {}; height: 100%;",
            cfg.px(cfg.row_gap), cfg.px(cfg.cell_padding)
        )>
            {cell.sub_rows()
                .into_iter()
                .map(|sub_row| view! {
                    <div style=format!(
                        "display: flex; flex-wrap: wrap; align-items: flex-start; gap: {};",
                        cfg.px(cfg.card_gap)
                    )>
                        {sub_row.entries
                            .into_iter()
                            .map(|entry| view! { <Card entry=entry cfg=cfg /> })
                            .collect::<Vec<_>>()}
                    </div>
                })
                .collect::<Vec<_>>()}
        </div>
    }
    .into_any()
}
