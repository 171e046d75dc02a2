use std::sync::Arc;

use pmtrack_events::ActivityNotifier;

use crate::config::ServerConfig;
use crate::storage::FileStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pmtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Writes activity rows after successful mutations.
    pub notifier: ActivityNotifier,
    /// Backend holding uploaded task files.
    pub storage: Arc<dyn FileStorage>,
}
