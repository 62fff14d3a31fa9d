//! Unified error handling for the HTTP surface.
//!
//! Provides a single error type that converts into Axum HTTP responses with
//! a structured JSON body. Internal details are logged here, once, and never
//! sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Request took too long")]
    Timeout,

    #[cfg(feature = "database")]
    #[error("Database error during {operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
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
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Timeout => "TIMEOUT",
            #[cfg(feature = "database")]
            AppError::Database { .. } => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal errors
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                "A demographic lookup service failed".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database { operation, source } => {
                tracing::error!(operation = *operation, "Database error: {:?}", source);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
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

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Wrap a `DbErr` with the name of the storage operation that failed.
    ///
    /// Meant for `map_err`: `.map_err(AppError::database("insert user"))`.
    #[cfg(feature = "database")]
    pub fn database(operation: &'static str) -> impl FnOnce(sea_orm::DbErr) -> AppError {
        move |source| AppError::Database { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_shows_message() {
        let (status, body) = body_json(AppError::validation("Missing 'name'")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
        assert!(body.contains("Missing 'name'"));
    }

    #[tokio::test]
    async fn test_upstream_error_hides_details() {
        let (status, body) =
            body_json(AppError::upstream("age lookup failed: connection refused")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("UPSTREAM_ERROR"));
        assert!(!body.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_json(AppError::internal("secret detail")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret detail"));
    }

    #[tokio::test]
    async fn test_timeout_is_service_unavailable() {
        let (status, body) = body_json(AppError::Timeout).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("TIMEOUT"));
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.code(), "NOT_FOUND");
    }

    #[test]
    fn test_domain_error_conversion() {
        let err = AppError::from(DomainError::validation("bad field"));
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "bad field"));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
