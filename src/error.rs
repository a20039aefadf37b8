//! # Structured Error Handling
//!
//! Central error taxonomy for the care task lifecycle engine. The web layer
//! maps these onto HTTP responses in `web::response_types`.

use thiserror::Error;

/// Errors surfaced by the lifecycle engine.
///
/// `NotFound` deliberately covers both "record absent" and "record owned by
/// someone else" so callers cannot probe for the existence of other users'
/// records.
#[derive(Debug, Error)]
pub enum CareError {
    #[error("authentication required")]
    Unauthorized,

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("record not found")]
    NotFound,

    #[error("storage error: {message}")]
    Storage { message: String },
}

impl CareError {
    /// Build an `InvalidRequest` naming the offending field(s).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Build a `Storage` error with operation context.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_carries_field_names() {
        let err = CareError::invalid_request("plantId, currentStage");
        assert_eq!(
            err.to_string(),
            "invalid request: plantId, currentStage"
        );
    }

    #[test]
    fn not_found_has_no_ownership_detail() {
        // Absence and foreign ownership must render identically.
        assert_eq!(CareError::NotFound.to_string(), "record not found");
    }
}
