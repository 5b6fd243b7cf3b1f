use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::config::IMAGE_CACHE_CONTROL;
use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(&state.dist_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let images = Router::new()
        .fallback_service(ServeDir::new(&state.images_dir))
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route(
            "/tier_list.json",
            axum::routing::get(routes::api::get_roster),
        )
        .route("/api/roster", axum::routing::get(routes::api::get_roster))
        .route("/api/health", axum::routing::get(routes::api::health))
        .nest_service("/images", images);

    app.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if is_image(path) || path.starts_with("/fonts/") {
        return Some(IMAGE_CACHE_CONTROL);
    }

    None
}

fn is_image(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "webp" | "gif" | "svg" | "avif"
            )
        })
}

fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use memoria_shared::Roster;
    use tower::ServiceExt;

    use super::*;
    use crate::state::{AppState, LoadedRoster};

    const ROSTER: &str = r##"{"version":"5.3.0","entries":[
        {"name":"Alice","version":"Default","color":"#ea9999","image":"alice.webp",
         "tier":"10 (Best)","role":"Healer","row_id":1,"rank_index":1},
        {"name":"Bob","version":"Summer","color":"#123456",
         "tier":"9","role":"Defender (General)","row_id":1,"rank_index":2}
    ]}"##;

    fn test_state(images: &Path, dist: &Path) -> AppState {
        let roster = Roster::from_json(ROSTER).expect("roster");
        let loaded = LoadedRoster::from_roster(roster).expect("loaded roster");
        AppState::new(loaded, images.to_path_buf(), dist.to_path_buf())
    }

    async fn get(app: Router, uri: &str, if_none_match: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(tag) = if_none_match {
            request = request.header(header::IF_NONE_MATCH, tag);
        }
        app.oneshot(request.body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/memoria-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/input-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn day_cache_for_images_and_fonts() {
        assert_eq!(cache_control_for_path("/alice.webp"), Some(IMAGE_CACHE_CONTROL));
        assert_eq!(cache_control_for_path("/images/Alice.PNG"), Some(IMAGE_CACHE_CONTROL));
        assert_eq!(
            cache_control_for_path("/fonts/inter.woff2"),
            Some(IMAGE_CACHE_CONTROL)
        );
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
    }

    #[tokio::test]
    async fn roster_is_served_with_etag_and_revalidates() {
        let images = tempfile::tempdir().expect("images dir");
        let dist = tempfile::tempdir().expect("dist dir");
        let app = build_app(test_state(images.path(), dist.path()));

        let response = get(app.clone(), "/tier_list.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let etag = response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .expect("etag header")
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let served = Roster::from_json(std::str::from_utf8(&body).expect("utf8")).expect("parse");
        assert_eq!(served.len(), 2);
        assert_eq!(served.version(), Some("5.3.0"));

        let cached = get(app, "/api/roster", Some(&etag)).await;
        assert_eq!(cached.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn health_reports_counts_and_audit_warnings() {
        let images = tempfile::tempdir().expect("images dir");
        let dist = tempfile::tempdir().expect("dist dir");
        let app = build_app(test_state(images.path(), dist.path()));

        let response = get(app, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["entries"], 2);
        assert_eq!(json["names"], 2);
        assert_eq!(json["version"], "5.3.0");
        let warnings = json["warnings"].as_array().expect("warnings array");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].as_str().unwrap_or_default().contains("#123456"));
    }

    #[tokio::test]
    async fn images_are_served_and_missing_ones_404() {
        let images = tempfile::tempdir().expect("images dir");
        let dist = tempfile::tempdir().expect("dist dir");
        std::fs::write(images.path().join("alice.webp"), b"RIFF").expect("write image");
        let app = build_app(test_state(images.path(), dist.path()));

        let found = get(app.clone(), "/images/alice.webp", None).await;
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(
            found.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some(IMAGE_CACHE_CONTROL)
        );

        let missing = get(app, "/images/nobody.webp", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bundle_is_served_from_dist() {
        let images = tempfile::tempdir().expect("images dir");
        let dist = tempfile::tempdir().expect("dist dir");
        std::fs::write(dist.path().join("index.html"), "<div id=\"app\"></div>")
            .expect("write index");
        let app = build_app(test_state(images.path(), dist.path()));

        let response = get(app, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
