//! Type-safe error codes for API responses.
//!
//! Each error code includes:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Path id is not a valid integer
    InvalidId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Malformed request that is not a field validation failure
    BadRequest,

    /// Request body exceeds the buffering limit
    PayloadTooLarge,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Integer code for logs and dashboards.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.code(), 1001);
    /// assert_eq!(ErrorCode::ServiceUnavailable.code(), 1011);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::BadRequest => 1006,
            Self::PayloadTooLarge => 1007,
            Self::ServiceUnavailable => 1011,
        }
    }

    /// Default user-facing message. Handlers may override it.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid ID",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::PayloadTooLarge => "Request body is too large",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
