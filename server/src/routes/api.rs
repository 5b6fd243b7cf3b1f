use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::config::ROSTER_CACHE_CONTROL;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let loaded = &state.roster;
    Json(serde_json::json!({
        "status": "ok",
        "entries": loaded.roster.len(),
        "names": loaded.roster.unique_names().len(),
        "version": loaded.roster.version(),
        "loaded_at": loaded.loaded_at.to_rfc3339(),
        "warnings": loaded.audit.warnings(),
    }))
}

/// Serve the pre-serialized roster; honors `If-None-Match` against its content hash.
pub async fn get_roster(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let loaded = &state.roster;
    if if_none_match_matches(&headers, &loaded.etag) {
        return not_modified_response(ROSTER_CACHE_CONTROL, &loaded.etag);
    }
    json_bytes_response(loaded.json.clone(), ROSTER_CACHE_CONTROL, &loaded.etag)
}

fn json_bytes_response(body: Bytes, cache_control: &'static str, etag: &str) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Ok(etag_header) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn not_modified_response(cache_control: &'static str, etag: &str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Ok(etag_header) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
