//! # Axum Helpers
//!
//! Utilities, middleware and helpers shared by the HTTP services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup with API docs, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (integer id path, validated JSON)
//! - **[`validation`]**: Per-route field validators and the validation gate
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{create_production_app, create_permissive_cors_layer, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new(), create_permissive_cors_layer());
//! let config = ServerConfig::default();
//! create_production_app(router, &config, config.shutdown_timeout(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{cors_for, create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};

// Re-export validation types
pub use validation::{
    Check, FieldError, FieldRule, Location, ValidationErrorResponse, ValidationReport,
    check_fields, validated, validation_gate,
};
