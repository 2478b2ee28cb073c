//! Zone listing (pass-through).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use crate::api::{auth, upstream_response, ApiError};
use crate::http::server::AppState;

/// `GET /api/zones` — forward the upstream zone list verbatim.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;

    let response = state
        .upstream
        .list_zones(&creds)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch zones from Cloudflare API", &e))?;

    Ok(upstream_response(response))
}
