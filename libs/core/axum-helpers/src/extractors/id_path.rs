//! Integer id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for `{id}` path parameters holding a serial primary key.
///
/// ```ignore
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.parse::<i32>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/products/{id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn test_parses_integer_id() {
        let request = Request::builder().uri("/products/42").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_non_integer_id() {
        let request = Request::builder().uri("/products/abc").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
