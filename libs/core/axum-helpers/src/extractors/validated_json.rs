//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body and runs the `validator` rules declared on `T`.
/// Rejections go through [`AppError`], so clients get the standard error body
/// with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     payload.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Input {
        #[validate(length(min = 1, max = 5))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(input): ValidatedJson<Input>| async move { input.name }),
        )
    }

    fn request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_payload() {
        let response = app().oneshot(request(r#"{"name":"ok"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_rule_violation() {
        let response = app().oneshot(request(r#"{"name":"too long"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_wrong_shape() {
        let response = app().oneshot(request(r#"{"name":3}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
