//! Readiness check backed by the database handle

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

/// Readiness check endpoint that actually checks the database connection.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let db = state.db.connection().await.map_err(|e| e.to_string())?;
            check_health(&db).await.map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
