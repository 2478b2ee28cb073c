//! Outbound HTTP client for the upstream API.
//!
//! # Responsibilities
//! - Build outbound requests against the configured base URL
//! - Attach the credential header pair to every call
//! - Capture upstream status + JSON body for pass-through
//! - Map transport and non-JSON-body failures to a single error type
//!
//! # Design Decisions
//! - One shared reqwest client; connections are pooled across requests
//! - No outbound timeout, retry or circuit breaking: a failure is surfaced
//!   to the caller on the same request (the inbound timeout layer bounds
//!   total lifetime)
//! - Calls are sequential; nothing here is parallelized

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::normalize::CertificateFilter;
use crate::upstream::types::{
    AssociationReplacement, CertificateUpload, ForwardingSettingsUpdate,
};

/// Per-request credentials for the upstream API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub key: String,
}

/// An upstream reply: status code plus decoded JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

/// Failures talking to the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned a non-JSON body (status {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client bound to one upstream base URL.
pub struct UpstreamClient {
    http: reqwest::Client,
    base: String,
}

impl UpstreamClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Url::parse(&config.api_base)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /zones`
    pub async fn list_zones(
        &self,
        creds: &Credentials,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.request(Method::GET, creds, "/zones", &[], None::<&Value>)
            .await
    }

    /// `GET /accounts/{accountId}/mtls_certificates`
    pub async fn list_certificates(
        &self,
        creds: &Credentials,
        account_id: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/accounts/{account_id}/mtls_certificates");
        self.request(Method::GET, creds, &path, &[], None::<&Value>)
            .await
    }

    /// `POST /accounts/{accountId}/mtls_certificates`
    pub async fn upload_certificate(
        &self,
        creds: &Credentials,
        account_id: &str,
        payload: &CertificateUpload,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/accounts/{account_id}/mtls_certificates");
        self.request(Method::POST, creds, &path, &[], Some(payload))
            .await
    }

    /// `GET /zones/{zoneId}/access/certificates/settings`
    pub async fn forwarding_settings(
        &self,
        creds: &Credentials,
        zone_id: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/zones/{zone_id}/access/certificates/settings");
        self.request(Method::GET, creds, &path, &[], None::<&Value>)
            .await
    }

    /// `PUT /zones/{zoneId}/access/certificates/settings`
    pub async fn update_forwarding_settings(
        &self,
        creds: &Credentials,
        zone_id: &str,
        payload: &ForwardingSettingsUpdate,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/zones/{zone_id}/access/certificates/settings");
        self.request(Method::PUT, creds, &path, &[], Some(payload))
            .await
    }

    /// `GET /zones/{zoneId}/certificate_authorities/hostname_associations`,
    /// optionally filtered by certificate id.
    pub async fn hostname_associations(
        &self,
        creds: &Credentials,
        zone_id: &str,
        filter: &CertificateFilter,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/zones/{zone_id}/certificate_authorities/hostname_associations");
        let query: Vec<(&str, &str)> = match filter.id() {
            Some(cert_id) => vec![("mtls_certificate_id", cert_id)],
            None => Vec::new(),
        };
        self.request(Method::GET, creds, &path, &query, None::<&Value>)
            .await
    }

    /// `PUT /zones/{zoneId}/certificate_authorities/hostname_associations`.
    ///
    /// Full-replace semantics: the supplied hostname list becomes the
    /// complete association set for the certificate.
    pub async fn replace_hostname_associations(
        &self,
        creds: &Credentials,
        zone_id: &str,
        payload: &AssociationReplacement,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/zones/{zone_id}/certificate_authorities/hostname_associations");
        self.request(Method::PUT, creds, &path, &[], Some(payload))
            .await
    }

    async fn request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        creds: &Credentials,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = format!("{}{}", self.base, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("X-Auth-Email", &creds.email)
            .header("X-Auth-Key", &creds.key)
            .header(reqwest::header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(UpstreamError::Request)?;
        let status = response.status().as_u16();

        tracing::debug!(method = %method, url = %url, status, "upstream response");

        let body = response
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::InvalidBody { status, source })?;

        Ok(UpstreamResponse { status, body })
    }
}
