use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DatabaseError> for ProductError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotConnected(_) | DatabaseError::ConnectionFailed(_) => {
                ProductError::Unavailable(err.to_string())
            }
            DatabaseError::Postgres(db_err) => db_err.into(),
            other => ProductError::Internal(other.to_string()),
        }
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                ProductError::Unavailable(err.to_string())
            }
            other => ProductError::Internal(format!("Database error: {}", other)),
        }
    }
}
