use std::sync::Arc;

use gamehub_storage::Storage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamehub_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Blob store for uploaded game assets. Held as a trait object so
    /// tests can substitute an in-memory provider.
    pub storage: Arc<dyn Storage>,
}
