pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error that is not a field validation failure:
/// - `code`: Integer error code for logging/monitoring (e.g., 1004)
/// - `error`: Machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Product 7 not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None, ErrorCode::JsonExtraction)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    serde_json::to_value(&e).ok(),
                    ErrorCode::ValidationError,
                )
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), raw = %raw, "Invalid id");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidId.default_message().to_string(),
                    None,
                    ErrorCode::InvalidId,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::InternalError,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    msg,
                    None,
                    ErrorCode::ServiceUnavailable,
                )
            }
        };

        let body = Json(ErrorResponse {
            details,
            ..ErrorResponse::new(code, message)
        });

        (status, body).into_response()
    }
}
