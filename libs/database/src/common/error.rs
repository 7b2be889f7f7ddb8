/// Unified database error type for all database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// PostgreSQL-specific errors (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The connection is not usable yet (or any more)
    #[error("Database is not connected (status: {0})")]
    NotConnected(String),

    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
