//! Hostname-association operations: the one place with real reshaping.
//!
//! # Responsibilities
//! - List associations for a zone or a certificate, normalized for the UI
//! - Replace a certificate's association set (the upstream PUT has
//!   full-replace semantics, never append)
//! - Remove a single hostname via a two-step read-modify-write
//!
//! # Design Decisions
//! - The delete sequence is not atomic: no version token exists on the
//!   upstream resource, so a concurrent writer between the GET and the PUT
//!   is silently overwritten (last writer wins)
//! - A non-success GET in the delete sequence is passed through unchanged
//!   and the PUT is never issued

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::{auth, upstream_response, ApiError};
use crate::http::server::AppState;
use crate::upstream::normalize::{hostname_list, reshape_associations, CertificateFilter};
use crate::upstream::types::AssociationReplacement;
use crate::upstream::{Credentials, UpstreamEnvelope};

#[derive(Debug, Deserialize)]
pub struct ZoneListQuery {
    #[serde(default, rename = "certId")]
    cert_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CertListQuery {
    #[serde(default, rename = "zoneId")]
    zone_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    #[serde(default, rename = "zoneId")]
    zone_id: Option<String>,
    #[serde(default)]
    hostname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssociateRequest {
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default)]
    hostnames: Option<Vec<String>>,
    #[serde(default, rename = "zoneId")]
    zone_id: Option<String>,
}

/// `GET /api/zones/{zoneId}/hostname_associations?certId=<id|all>`
pub async fn list_for_zone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(zone_id): Path<String>,
    Query(query): Query<ZoneListQuery>,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;
    let filter = CertificateFilter::from_param(query.cert_id.as_deref());
    fetch_normalized(&state, &creds, &zone_id, &filter).await
}

/// `GET /api/certificates/{certId}/hostnames?zoneId=<id>`
pub async fn list_for_certificate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cert_id): Path<String>,
    Query(query): Query<CertListQuery>,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;
    let zone_id = query.zone_id.unwrap_or_default();
    if zone_id.is_empty() {
        return Err(ApiError::validation(
            "Missing required query parameter: zoneId",
        ));
    }

    let filter = CertificateFilter::from_param(Some(&cert_id));
    fetch_normalized(&state, &creds, &zone_id, &filter).await
}

/// `POST /api/certificates/{certId}/hostnames` body
/// `{hostname | hostnames[], zoneId}`.
///
/// Replace semantics: the supplied hostname list becomes the certificate's
/// complete association set. Callers wanting to add a hostname must send the
/// full desired set.
pub async fn associate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cert_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;

    if body.is_empty() || body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::validation("Empty request body"));
    }
    let request: AssociateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))?;

    let zone_id = request.zone_id.unwrap_or_default();
    let has_hostnames = request.hostnames.is_some()
        || request.hostname.as_deref().is_some_and(|h| !h.is_empty());
    if !has_hostnames || zone_id.is_empty() {
        return Err(ApiError::validation(
            "Missing required fields: either hostname (string) or hostnames (array) is required, along with zoneId",
        ));
    }

    // An explicit array wins over the single-hostname form.
    let hostnames: Vec<String> = match request.hostnames {
        Some(list) => list,
        None => request.hostname.into_iter().collect(),
    };
    if hostnames.is_empty() {
        return Err(ApiError::validation(
            "No valid hostnames provided for association",
        ));
    }

    tracing::info!(
        cert_id = %cert_id,
        zone_id = %zone_id,
        count = hostnames.len(),
        "replacing hostname associations"
    );

    let payload = AssociationReplacement {
        hostnames,
        mtls_certificate_id: cert_id,
    };

    let response = state
        .upstream
        .replace_hostname_associations(&creds, &zone_id, &payload)
        .await
        .map_err(|e| {
            ApiError::upstream("Failed to associate hostname with certificate", &e)
        })?;

    Ok(upstream_response(response))
}

/// `DELETE /api/certificates/{certId}/hostnames?zoneId=<id>&hostname=<h>`
///
/// Two-step read-modify-write: fetch the current set, drop the target,
/// PUT the reduced set back. Last writer wins; see module docs.
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(cert_id): Path<String>,
    Query(query): Query<RemoveQuery>,
) -> Result<Response, ApiError> {
    let creds = auth::resolve_credentials(&headers, &state.config.upstream)?;

    let zone_id = query.zone_id.unwrap_or_default();
    let hostname = query.hostname.unwrap_or_default();
    if zone_id.is_empty() || hostname.is_empty() {
        return Err(ApiError::validation(
            "Missing required query parameters: zoneId and hostname",
        ));
    }

    let filter = CertificateFilter::from_param(Some(&cert_id));
    let current = state
        .upstream
        .hostname_associations(&creds, &zone_id, &filter)
        .await
        .map_err(|e| ApiError::upstream("Failed to delete hostname association", &e))?;

    let envelope: UpstreamEnvelope =
        serde_json::from_value(current.body.clone()).unwrap_or_default();
    if !envelope.success {
        // The read failed upstream; surface it as-is and skip the PUT.
        let status =
            StatusCode::from_u16(current.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return Ok((status, Json(current.body)).into_response());
    }

    let remaining: Vec<String> = hostname_list(envelope.result)
        .into_iter()
        .filter(|h| h != &hostname)
        .collect();

    tracing::info!(
        cert_id = %cert_id,
        zone_id = %zone_id,
        hostname = %hostname,
        remaining = remaining.len(),
        "removing hostname association"
    );

    let payload = AssociationReplacement {
        hostnames: remaining,
        mtls_certificate_id: cert_id,
    };

    let response = state
        .upstream
        .replace_hostname_associations(&creds, &zone_id, &payload)
        .await
        .map_err(|e| ApiError::upstream("Failed to delete hostname association", &e))?;

    Ok(upstream_response(response))
}

async fn fetch_normalized(
    state: &AppState,
    creds: &Credentials,
    zone_id: &str,
    filter: &CertificateFilter,
) -> Result<Response, ApiError> {
    let response = state
        .upstream
        .hostname_associations(creds, zone_id, filter)
        .await
        .map_err(|e| ApiError::upstream("Error fetching hostname associations", &e))?;

    let envelope: UpstreamEnvelope =
        serde_json::from_value(response.body).unwrap_or_default();
    let reshaped = reshape_associations(envelope, filter);

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(reshaped)).into_response())
}
