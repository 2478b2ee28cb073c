//! The `/api` surface: dispatch table and shared handler plumbing.
//!
//! # Responsibilities
//! - Map (method, path shape) pairs to operations, first match wins
//! - Report unmatched method/path combinations under `/api` as a structured
//!   404 naming the path
//! - Share the pass-through response and JSON body-parsing helpers
//!
//! Method mismatches on known paths (e.g. `DELETE /api/zones`) fall through
//! to the same structured 404 the unknown-path case produces, matching the
//! fixed dispatch table this replaces rather than a generic 405.

pub mod auth;
pub mod certificates;
pub mod error;
pub mod forwarding;
pub mod hostnames;
pub mod zones;

pub use error::ApiError;

use axum::body::Bytes;
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::http::server::AppState;
use crate::upstream::UpstreamResponse;

/// Build the `/api` sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/zones", get(zones::list))
        .route(
            "/zones/{zone_id}/hostname_associations",
            get(hostnames::list_for_zone),
        )
        .route(
            "/zones/{zone_id}/certificate_forwarding",
            get(forwarding::settings).put(forwarding::update),
        )
        .route(
            "/certificates",
            get(certificates::list).post(certificates::upload),
        )
        .route(
            "/certificates/{cert_id}/hostnames",
            get(hostnames::list_for_certificate)
                .post(hostnames::associate)
                .delete(hostnames::remove),
        )
        .fallback(unknown_endpoint)
        .method_not_allowed_fallback(unknown_endpoint)
}

/// Structured 404 for unmatched requests under `/api`.
async fn unknown_endpoint(OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path().trim_start_matches('/');
    tracing::debug!(path = %uri.path(), "unknown API endpoint");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "errors": [{"message": format!("Unknown API endpoint: /{path}")}],
        })),
    )
        .into_response()
}

/// Forward an upstream status code and JSON body verbatim.
pub(crate) fn upstream_response(response: UpstreamResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(response.body)).into_response()
}

/// Decode a JSON request body, mapping any parse failure to the standard
/// 400 message.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::validation("Invalid JSON body"))
}
