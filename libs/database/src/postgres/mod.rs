//! PostgreSQL connector and utilities
//!
//! Provides connection management, migration running, health checks and the
//! [`DatabaseHandle`] that tracks the connection lifecycle.

mod config;
mod connector;
mod handle;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_with_options, run_migrations};
pub use handle::{ConnectionStatus, DatabaseHandle};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
