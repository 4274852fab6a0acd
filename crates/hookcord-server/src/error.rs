//! Error handling for the webhook endpoint.
//!
//! GitHub only looks at the status code, so every error answers with an empty
//! body. The detail goes to the log instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hookcord_core::RelayError;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(
            status = %self.status.as_u16(),
            code = %self.code,
            error = %self.message,
            "Webhook handling failed"
        );
        self.status.into_response()
    }
}

// Relay faults always answer 500 so the delivery shows as failed on GitHub.
impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let message = match err.suggestion() {
            Some(hint) => format!("{} ({})", err, hint),
            None => err.to_string(),
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.code().as_str(), message)
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
