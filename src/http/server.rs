//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, timeout)
//! - Normalize trailing slashes before routing
//! - Plain-text 404 for paths outside the UI and `/api`
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Router, ServiceExt};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ProxyConfig;
use crate::http::{assets, cors, request};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
///
/// Both fields are immutable after construction; requests share nothing
/// mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the certificate manager proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, url::ParseError> {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);
        let state = AppState {
            config: Arc::new(config),
            upstream,
        };
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order matters: CORS is outermost so `OPTIONS` short-circuits
    /// before routing and every response carries the header set.
    fn build_router(state: AppState) -> Router {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .route("/", get(assets::index))
            .route("/styles.css", get(assets::stylesheet))
            .route("/script.js", get(assets::script))
            .nest("/api", api::router())
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request::propagate_request_id))
            .layer(middleware::from_fn(cors::cors))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // Trailing slashes are stripped before routing, so /api/zones/ and
        // /api/zones select the same operation.
        let app = NormalizePathLayer::trim_trailing_slash().layer(self.router);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Plain-text 404 for anything outside the UI and `/api`.
async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "not found");
    (StatusCode::NOT_FOUND, format!("Not found: {}", uri.path()))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
