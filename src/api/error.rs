//! API error taxonomy.
//!
//! Every failure a handler can produce on its own maps onto one of three
//! cases: missing credentials (401), failed input validation (400), or an
//! unreachable/unintelligible upstream (502). Upstream-reported errors are
//! not represented here; their status and body pass through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::upstream::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing authentication credentials. Provide X-Auth-Email and X-Auth-Key headers.")]
    AuthMissing,

    #[error("{0}")]
    Validation(String),

    #[error("{message}: {details}")]
    Upstream { message: String, details: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Wrap a transport/decode failure with an operation-specific message.
    pub fn upstream(message: impl Into<String>, source: &UpstreamError) -> Self {
        ApiError::Upstream {
            message: message.into(),
            details: source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::AuthMissing => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "success": false,
                    "errors": [{"message": self.to_string()}],
                }),
            ),
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "errors": [{"message": message}],
                }),
            ),
            ApiError::Upstream { message, details } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "success": false,
                    "errors": [{"message": message}],
                    "details": details,
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::AuthMissing.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::validation("nope").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream {
                message: "m".into(),
                details: "d".into()
            }
            .into_response()
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
