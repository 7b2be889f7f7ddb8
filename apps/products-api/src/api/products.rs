//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router over the shared database handle
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
