use memoria_shared::ScrollRequest;
use wasm_bindgen::JsCast;

/// Attribute every card carries so scroll requests can find it.
pub const RANK_ATTR: &str = "data-rank-index";

pub fn rank_selector(rank_index: i64) -> String {
    format!("[{RANK_ATTR}='{rank_index}']")
}

/// Smooth-scroll the card for `request` to the center of the grid.
/// No-op when that card is not mounted (e.g. hidden by the element filter).
pub fn scroll_to(request: ScrollRequest) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = window.document() else {
        return;
    };
    let Ok(Some(el)) = doc.query_selector(&rank_selector(request.rank_index)) else {
        return;
    };
    let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Center);
    options.set_inline(web_sys::ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}
