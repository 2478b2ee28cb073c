//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → passed into HttpServer / UpstreamClient at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so a minimal (or absent) config works
//! - Upstream credentials/account id are request-level fallbacks, not
//!   requirements: callers normally supply them per request via headers
//! - No global/ambient state: the config value is threaded explicitly into
//!   the adapter

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
