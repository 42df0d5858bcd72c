//! Unified error handling for the user service.
//!
//! Every operation returns `AppResult<T>`. Faults fall into three classes:
//! field-rule violations, business-rule rejections, and faults surfaced by the
//! repository. The last class is carried unchanged so callers can inspect it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Faults raised by a repository implementation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The caller's cancellation token fired before the call finished
    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        RepositoryError::Storage(msg.into())
    }

    /// Check if this fault came from cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RepositoryError::Cancelled)
    }
}

/// Result type alias for repository calls
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more field-rule violations, already joined into one report
    #[error("{0}")]
    Validation(String),

    /// Business-rule rejection (unknown id, duplicate name)
    #[error("{0}")]
    InvalidArgument(String),

    /// Fault from the repository, passed through untouched
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Repository(RepositoryError::Cancelled) => "CANCELLED",
            AppError::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(RepositoryError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::InvalidArgument(msg) => msg.clone(),
            AppError::Repository(RepositoryError::Cancelled) => {
                "The request was cancelled".to_string()
            }
            AppError::Repository(e) => {
                tracing::error!("Repository error: {:?}", e);
                "An internal error occurred".to_string()
            }
        }
    }

    /// Check if this is a field-rule violation
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Check if this is a business-rule rejection
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_))
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_invalid_argument(self, reason: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid_argument(self, reason: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::invalid_argument(reason))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Join violation messages into a single validation report
    pub fn from_violations(violations: &[String], separator: &str) -> Self {
        AppError::Validation(violations.join(separator))
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        AppError::InvalidArgument(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let validation = AppError::validation("Name must not be empty");
        let argument = AppError::invalid_argument("User not found");

        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(argument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(argument.user_message(), "User not found");
    }

    #[test]
    fn test_repository_errors_hide_details() {
        let err = AppError::from(RepositoryError::storage("disk on fire"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "REPOSITORY_ERROR");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_cancelled_maps_to_service_unavailable() {
        let err = AppError::from(RepositoryError::Cancelled);

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "CANCELLED");
    }

    #[test]
    fn test_repository_fault_keeps_its_display() {
        let err = AppError::from(RepositoryError::storage("boom"));
        assert_eq!(err.to_string(), "Storage error: boom");
    }

    #[test]
    fn test_from_violations_joins_messages() {
        let messages = vec!["first".to_string(), "second".to_string()];

        assert_eq!(
            AppError::from_violations(&messages, ", ").to_string(),
            "first, second"
        );
        assert_eq!(
            AppError::from_violations(&messages, "\n").to_string(),
            "first\nsecond"
        );
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        let err = missing.ok_or_invalid_argument("User not found").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(Some(3).ok_or_invalid_argument("x").unwrap(), 3);
    }
}
