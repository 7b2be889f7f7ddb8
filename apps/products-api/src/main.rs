//! Products API - REST server

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use products_api::{app, config::Config, connect_database, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config);

    // Startup connection runs in the background; failures are logged, not fatal
    tokio::spawn(connect_database(
        state.db.clone(),
        state.config.database.clone(),
    ));

    let router = app(&state)?;

    info!(
        "Starting {} v{}",
        state.config.app.name, state.config.app.version
    );

    let db = state.db.clone();
    create_production_app(
        router,
        &state.config.server,
        state.config.server.shutdown_timeout(),
        async move {
            info!("Shutting down: closing database connections");
            db.close().await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
