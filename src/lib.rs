//! mTLS Certificate Manager Proxy
//!
//! A small HTTP edge service that proxies and reshapes calls to the
//! Cloudflare v4 REST API for mTLS certificate management, and serves a
//! bundled browser UI for operators.
//!
//! # Architecture Overview
//!
//! ```text
//! inbound request
//!     → http::server (axum Router, CORS preflight, request ID, tracing)
//!     → api::* handler (credential + input validation)
//!     → upstream::UpstreamClient (one or two outbound calls)
//!     → upstream::normalize (hostname-association reshaping, where applicable)
//!     → response (upstream status/body pass-through, CORS headers attached)
//! ```
//!
//! Every request is handled independently and statelessly; the only shared
//! state is the immutable configuration and the outbound HTTP client.

pub mod api;
pub mod config;
pub mod http;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
