use std::sync::Arc;

use catalog_db::Db;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Document store handle with the configured collections.
    pub db: Db,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
