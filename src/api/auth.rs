//! Per-request credential resolution.
//!
//! Credentials come from the `X-Auth-Email` / `X-Auth-Key` headers, falling
//! back to the configured defaults (empty unless set). Resolution happens
//! before any outbound call; a request missing either value is rejected with
//! 401 without touching the upstream.

use axum::http::HeaderMap;

use crate::api::ApiError;
use crate::config::UpstreamConfig;
use crate::upstream::Credentials;

pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";
pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";

/// Resolve credentials from headers with config fallback.
pub fn resolve_credentials(
    headers: &HeaderMap,
    defaults: &UpstreamConfig,
) -> Result<Credentials, ApiError> {
    let email =
        header_value(headers, AUTH_EMAIL_HEADER).unwrap_or_else(|| defaults.auth_email.clone());
    let key =
        header_value(headers, AUTH_KEY_HEADER).unwrap_or_else(|| defaults.auth_key.clone());

    if email.is_empty() || key.is_empty() {
        return Err(ApiError::AuthMissing);
    }

    Ok(Credentials { email, key })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
