//! Application state management

use database::postgres::DatabaseHandle;

/// Shared application state
///
/// `db` starts disconnected; the startup task fills it in once the
/// connection and migrations succeed.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseHandle,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config,
            db: DatabaseHandle::new(),
        }
    }
}
