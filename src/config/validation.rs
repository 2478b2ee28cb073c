//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and upstream base URL
//! - Catch half-configured credential defaults
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid upstream base URL '{0}': {1}")]
    InvalidApiBase(String, String),

    #[error("upstream base URL '{0}' must use http or https")]
    UnsupportedApiScheme(String),

    #[error("auth_email and auth_key must be configured together")]
    PartialCredentials,
}

/// Validate the full configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.api_base) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedApiScheme(
                    config.upstream.api_base.clone(),
                ));
            }
        }
        Err(e) => {
            errors.push(ValidationError::InvalidApiBase(
                config.upstream.api_base.clone(),
                e.to_string(),
            ));
        }
    }

    // A lone email or key can never authenticate; empty-empty is fine
    // (credentials then come from request headers).
    if config.upstream.auth_email.is_empty() != config.upstream.auth_key.is_empty() {
        errors.push(ValidationError::PartialCredentials);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
