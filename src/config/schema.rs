//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the certificate manager proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream Cloudflare API settings and request-level fallbacks.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Upstream API settings.
///
/// `auth_email`, `auth_key` and `account_id` are fallbacks used when a
/// request does not carry the corresponding header or field. All three are
/// empty by default, in which case every request must supply its own.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the Cloudflare v4 API.
    pub api_base: String,

    /// Default value for the X-Auth-Email header.
    pub auth_email: String,

    /// Default value for the X-Auth-Key header.
    pub auth_key: String,

    /// Default account id for account-scoped operations.
    pub account_id: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.cloudflare.com/client/v4".to_string(),
            auth_email: String::new(),
            auth_key: String::new(),
            account_id: String::new(),
        }
    }
}

/// Timeout configuration.
///
/// Only the inbound request lifetime is bounded. Outbound calls carry no
/// timeout of their own; a hanging upstream call is cut off when the inbound
/// request times out.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
