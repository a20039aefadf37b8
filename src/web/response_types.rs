//! # Web API Error Types
//!
//! HTTP-facing error type and its response conversion. Uses thiserror for
//! the taxonomy and Axum's `IntoResponse` for the wire mapping; bodies carry
//! a short machine-readable envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::CareError;

/// Web API errors with HTTP status code mappings.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Create a BadRequest error with a custom message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found"),

            // Deliberately generic: no detail about why verification failed.
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required",
            ),

            Self::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.as_str())
            }

            // Detail was logged server-side at the conversion site.
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<CareError> for ApiError {
    fn from(err: CareError) -> Self {
        match err {
            CareError::Unauthorized => Self::Unauthorized,
            CareError::InvalidRequest { message } => Self::BadRequest { message },
            CareError::NotFound => Self::NotFound,
            CareError::Storage { message } => {
                error!(error = %message, "storage failure surfaced to caller as 500");
                Self::Internal
            }
        }
    }
}

/// Result type alias for web API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn care_errors_map_onto_the_documented_statuses() {
        assert!(matches!(
            ApiError::from(CareError::Unauthorized),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(CareError::NotFound),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(CareError::invalid_request("plantId")),
            ApiError::BadRequest { .. }
        ));
        // Storage detail is masked from the caller.
        assert!(matches!(
            ApiError::from(CareError::storage("connection reset")),
            ApiError::Internal
        ));
    }
}
