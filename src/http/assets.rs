//! Embedded operator UI assets.
//!
//! The three UI files are compiled into the binary so the service deploys as
//! a single artifact, served with the same content types the API's original
//! front end used.

use axum::http::header;
use axum::response::IntoResponse;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const STYLES_CSS: &str = include_str!("../../assets/styles.css");
const SCRIPT_JS: &str = include_str!("../../assets/script.js");

/// `GET /`
pub async fn index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html;charset=UTF-8")],
        INDEX_HTML,
    )
}

/// `GET /styles.css`
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css;charset=UTF-8")], STYLES_CSS)
}

/// `GET /script.js`
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript;charset=UTF-8")],
        SCRIPT_JS,
    )
}
