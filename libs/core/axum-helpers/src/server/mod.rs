//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let app = create_router::<ApiDoc>(api_routes, cors).merge(health_router(app_info!()));
//! create_production_app(app, &server_config, timeout, async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
