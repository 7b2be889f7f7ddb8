use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{PostgresConfig, connect_from_config, run_migrations};
use crate::common::{DatabaseError, DatabaseResult};

#[derive(Default)]
enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(DatabaseConnection),
    Failed(String),
}

/// Observable connection state, without the pool itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Shared, late-bound database connection
///
/// The HTTP server starts before the database is reachable. The handle is
/// cloned into every repository and starts out `Disconnected`; a startup task
/// calls [`DatabaseHandle::connect`], and request paths call
/// [`DatabaseHandle::connection`], which fails with
/// [`DatabaseError::NotConnected`] until the connection is established.
#[derive(Clone, Default)]
pub struct DatabaseHandle {
    state: Arc<RwLock<ConnectionState>>,
}

impl DatabaseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-open connection (tests, tooling)
    pub fn connected(db: DatabaseConnection) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConnectionState::Connected(db))),
        }
    }

    pub async fn status(&self) -> ConnectionStatus {
        match &*self.state.read().await {
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
            ConnectionState::Connecting => ConnectionStatus::Connecting,
            ConnectionState::Connected(_) => ConnectionStatus::Connected,
            ConnectionState::Failed(_) => ConnectionStatus::Failed,
        }
    }

    /// Get the pool, or `NotConnected` with the current status
    pub async fn connection(&self) -> DatabaseResult<DatabaseConnection> {
        match &*self.state.read().await {
            ConnectionState::Connected(db) => Ok(db.clone()),
            ConnectionState::Failed(reason) => Err(DatabaseError::NotConnected(format!(
                "connection failed: {reason}"
            ))),
            ConnectionState::Connecting => {
                Err(DatabaseError::NotConnected("connection in progress".to_string()))
            }
            ConnectionState::Disconnected => {
                Err(DatabaseError::NotConnected("not connected".to_string()))
            }
        }
    }

    /// Open the pool, verify it and apply pending migrations
    ///
    /// Moves the handle through `Connecting` to `Connected` or `Failed`.
    /// Errors are returned for the caller to log; the handle keeps the reason.
    pub async fn connect<M: MigratorTrait>(&self, config: PostgresConfig) -> DatabaseResult<()> {
        *self.state.write().await = ConnectionState::Connecting;
        self.settle(Self::establish::<M>(config).await).await
    }

    /// Record the outcome of a connection attempt
    ///
    /// Only applies while the handle is still `Connecting`. If [`close`](Self::close)
    /// ran in the meantime, a freshly opened pool is closed instead of stored.
    async fn settle(&self, result: DatabaseResult<DatabaseConnection>) -> DatabaseResult<()> {
        let mut state = self.state.write().await;
        let still_connecting = matches!(*state, ConnectionState::Connecting);

        match result {
            Ok(db) if still_connecting => {
                *state = ConnectionState::Connected(db);
                info!("Database connection established");
                Ok(())
            }
            Ok(db) => {
                drop(state);
                warn!("Database handle closed while connecting, discarding new pool");
                if let Err(e) = db.close().await {
                    warn!(error = %e, "Failed to close discarded database connection");
                }
                Err(DatabaseError::NotConnected(
                    "handle closed while connecting".to_string(),
                ))
            }
            Err(e) => {
                if still_connecting {
                    *state = ConnectionState::Failed(e.to_string());
                }
                Err(e)
            }
        }
    }

    async fn establish<M: MigratorTrait>(
        config: PostgresConfig,
    ) -> DatabaseResult<DatabaseConnection> {
        let db = connect_from_config(config)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        db.ping()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        run_migrations::<M>(&db, "products")
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        Ok(db)
    }

    /// Close the pool, if one is open, and return to `Disconnected`
    pub async fn close(&self) {
        let previous = std::mem::take(&mut *self.state.write().await);
        if let ConnectionState::Connected(db) = previous {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!(error = %e, "Failed to close database connection cleanly"),
            }
        }
    }
}
