/// Embedded static assets
///
/// The strict Content-Security-Policy forbids inline script, so page
/// behavior lives in `/assets/app.js`.

use axum::{http::header, response::IntoResponse};

use crate::views::{APP_CSS, APP_JS};

const CACHE_CONTROL: &str = "public, max-age=3600";

pub async fn app_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        APP_JS,
    )
}

pub async fn app_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        APP_CSS,
    )
}
