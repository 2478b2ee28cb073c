//! Upstream adapter for the Cloudflare v4 API.
//!
//! # Data Flow
//! ```text
//! api handler (validated input + credentials)
//!     → client.rs (one outbound call, credential header pair)
//!     → UpstreamResponse { status, body }
//!     → normalize.rs (hostname-association reshaping, where applicable)
//!     → handler returns upstream status + body
//! ```
//!
//! # Design Decisions
//! - Upstream status codes and bodies are forwarded verbatim unless an
//!   operation explicitly reshapes them
//! - Transport failures and non-JSON upstream bodies map to 502; no retries
//! - The base URL and credential fallbacks come from config at construction,
//!   never from ambient state

pub mod client;
pub mod normalize;
pub mod types;

pub use client::{Credentials, UpstreamClient, UpstreamError, UpstreamResponse};
pub use normalize::{CertificateFilter, CertificateOwner, DEFAULT_CERT_ID};
pub use types::UpstreamEnvelope;
