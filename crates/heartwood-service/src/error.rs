//! Service error taxonomy and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One structured validation issue.
#[derive(Clone, Debug, Serialize)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that reach the end user. Everything else in the checkout path is
/// logged and swallowed by design.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing required fields; no side effects occurred.
    #[error("validation failed")]
    Validation(Vec<Issue>),

    /// A required external credential is absent; rejected before any
    /// external call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The payment processor rejected the request; status and message are
    /// propagated verbatim.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "validation_failed", "issues": issues })),
            )
                .into_response(),
            ServiceError::Configuration(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ServiceError::Upstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_bad_status_falls_back() {
        let response = ServiceError::Upstream {
            status: 9999,
            message: "weird".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_is_400() {
        let response =
            ServiceError::Validation(vec![Issue::new("items", "required")]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
