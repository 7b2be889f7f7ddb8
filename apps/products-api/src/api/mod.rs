use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

pub mod health;
pub mod products;

/// Body of `GET /api`
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    #[schema(example = "API working")]
    pub msg: &'static str,
}

/// API liveness message
#[utoipa::path(
    get,
    path = "/api",
    tag = "Products",
    responses(
        (status = 200, description = "The API is up", body = IndexResponse)
    )
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse { msg: "API working" })
}

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/products", products::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
