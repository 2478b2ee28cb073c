//! Request ID handling.
//!
//! Every request gets an `x-request-id` (UUID v4 unless the client supplied
//! one) as early as possible so log lines across the handler and the
//! outbound call correlate; the id is echoed on the response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Assign (or keep) a request id and echo it on the response.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match HeaderValue::from_str(&id) {
        Ok(value) => {
            request.headers_mut().insert(X_REQUEST_ID, value.clone());
            let mut response = next.run(request).await;
            response.headers_mut().insert(X_REQUEST_ID, value);
            response
        }
        // Unrepresentable client-supplied id; pass the request on untouched.
        Err(_) => next.run(request).await,
    }
}
