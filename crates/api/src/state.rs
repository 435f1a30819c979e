use std::sync::Arc;

use sanse_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Repository implementations for every collection.
    pub store: Store,
    /// Server configuration (JWT settings, timeouts).
    pub config: Arc<ServerConfig>,
}
