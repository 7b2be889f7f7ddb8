//! Products API - REST server
//!
//! The binary in `main.rs` loads [`config::Config`], builds the router with
//! [`app`] and starts [`connect_database`] in the background, so the server
//! accepts requests while the database is still coming up.

use axum::Router;
use axum_helpers::{cors_for, create_router, health_router};
use database::postgres::{DatabaseHandle, PostgresConfig};
use migration::Migrator;
use tracing::{error, info};

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use state::AppState;

/// Build the full HTTP application
///
/// Errors only when a configured CORS origin is not a valid header value.
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let cors = cors_for(
        &state.config.server.cors_allowed_origins,
        state.config.environment.is_development(),
    )?;

    let router = create_router::<openapi::ApiDoc>(api::routes(state), cors)
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    Ok(router)
}

/// Connect `handle` to PostgreSQL and synchronize the schema
///
/// Failures are logged and left on the handle; product routes answer `503`
/// until a connection exists.
pub async fn connect_database(handle: DatabaseHandle, config: PostgresConfig) {
    info!("Connecting to database");

    match handle.connect::<Migrator>(config).await {
        Ok(()) => info!("Database connection successful"),
        Err(e) => error!(error = %e, "Error connecting to database"),
    }
}
