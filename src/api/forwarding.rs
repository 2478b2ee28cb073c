//! Client-certificate-forwarding settings (pass-through).

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Deserialize;

use crate::api::{auth, parse_json_body, upstream_response, ApiError};
use crate::http::server::AppState;
use crate::upstream::types::{ForwardingSetting, ForwardingSettingsUpdate};

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default)]
    enabled: Option<bool>,
}

/// `GET /api/zones/{zoneId}/certificate_forwarding` — forward the settings.
pub async fn settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(zone_id): Path<String>,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;
    require_zone_id(&zone_id)?;

    let response = state
        .upstream
        .forwarding_settings(&creds, &zone_id)
        .await
        .map_err(|e| {
            ApiError::upstream("Failed to fetch certificate forwarding settings", &e)
        })?;

    Ok(upstream_response(response))
}

/// `PUT /api/zones/{zoneId}/certificate_forwarding` body `{hostname, enabled}`.
///
/// The outbound payload always carries `china_network: false`; no
/// caller-facing control for that field exists (known limitation).
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(zone_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;
    require_zone_id(&zone_id)?;

    let request: UpdateRequest = parse_json_body(&body)?;
    let hostname = request.hostname.unwrap_or_default();
    if hostname.is_empty() {
        return Err(ApiError::validation("Missing required field: hostname"));
    }

    let enabled = request.enabled == Some(true);
    tracing::info!(
        zone_id = %zone_id,
        hostname = %hostname,
        enabled,
        "updating certificate forwarding"
    );

    let payload = ForwardingSettingsUpdate {
        settings: vec![ForwardingSetting {
            hostname,
            client_certificate_forwarding: enabled,
            china_network: false,
        }],
    };

    let response = state
        .upstream
        .update_forwarding_settings(&creds, &zone_id, &payload)
        .await
        .map_err(|e| {
            ApiError::upstream("Failed to update certificate forwarding settings", &e)
        })?;

    Ok(upstream_response(response))
}

fn require_zone_id(zone_id: &str) -> Result<(), ApiError> {
    if zone_id.trim().is_empty() {
        return Err(ApiError::validation("Missing required parameter: zoneId"));
    }
    Ok(())
}
