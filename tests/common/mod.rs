//! Shared utilities for integration testing.
//!
//! Spins up a programmable mock upstream (recording every request it sees)
//! and the real proxy server, both on ephemeral loopback ports.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use mtls_cert_manager::{HttpServer, ProxyConfig};

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_KEY: &str = "test-api-key";

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> (u16, Value) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    respond: Responder,
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

/// Start a mock upstream that answers every request via `respond`.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&RecordedRequest) -> (u16, Value) + Send + Sync + 'static,
{
    let log = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        log: log.clone(),
        respond: Arc::new(respond),
    };

    let app = Router::new().fallback(capture).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, log }
}

async fn capture(State(state): State<MockState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let query = parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    };

    let (status, body) = (state.respond)(&recorded);
    state.log.lock().unwrap().push(recorded);

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(body),
    )
        .into_response()
}

/// Handle to a running proxy instance.
pub struct TestProxy {
    pub addr: SocketAddr,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Default test config pointing at the given upstream base URL.
pub fn proxy_config(upstream_base: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.api_base = upstream_base.to_string();
    config
}

/// Start the real proxy server on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    TestProxy { addr }
}

/// A client that never picks up ambient proxy configuration.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Convenience: a request builder with the test credential headers attached.
pub fn authed(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder
        .header("X-Auth-Email", TEST_EMAIL)
        .header("X-Auth-Key", TEST_KEY)
}
