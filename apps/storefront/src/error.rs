//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Input line                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  "add 42"                                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  No session? ──────── ErrorCode::Unauthorized ────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Unknown id? ──── CoreError::ProductNotFound ─── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell prints { "ok": false, "error": { code, message } }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};

use crate::source::SourceError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// No session, or credentials rejected
    Unauthorized,

    /// Product list or login endpoint unavailable
    SourceError,

    /// Unparseable command line
    BadCommand,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn bad_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::DuplicateProduct(_) | CoreError::InvalidProduct { .. } => {
                tracing::error!("Product feed rejected: {}", err);
                ApiError::new(ErrorCode::SourceError, "Product feed is invalid")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts product source and login failures to API errors.
impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        if err.is_unauthorized() {
            return ApiError::unauthorized("Invalid credentials");
        }
        match err {
            SourceError::Feed(e) => ApiError::from(e),
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Store request failed: {}", other);
                ApiError::new(ErrorCode::SourceError, "Store is unavailable")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::not_found("Product", 42)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::ProductNotFound(7));
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::from(CoreError::DuplicateProduct(1));
        assert_eq!(err.code, ErrorCode::SourceError);

        let err = ApiError::from(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "page must be positive");
    }

    #[test]
    fn test_rejected_login_is_unauthorized() {
        let err = ApiError::from(SourceError::Status {
            operation: "POST /auth/login".to_string(),
            status: 401,
        });
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Invalid credentials");

        let err = ApiError::from(SourceError::Status {
            operation: "GET /products".to_string(),
            status: 500,
        });
        assert_eq!(err.code, ErrorCode::SourceError);
    }

    #[test]
    fn test_display() {
        let err = ApiError::bad_command("unknown command: fly");
        assert_eq!(err.to_string(), "[BadCommand] unknown command: fly");
    }
}
