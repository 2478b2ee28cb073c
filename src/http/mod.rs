//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → cors.rs (OPTIONS preflight short-circuit, header injection)
//!     → request.rs (assign x-request-id)
//!     → server.rs (axum Router: UI assets, /api dispatch, fallbacks)
//!     → api handlers / assets
//! ```

pub mod assets;
pub mod cors;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
