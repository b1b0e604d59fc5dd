use std::sync::Arc;

use catalog_core::store::CatalogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend, PostgreSQL or in-memory.
    pub store: Arc<dyn CatalogStore>,
    pub config: Arc<ServerConfig>,
}
