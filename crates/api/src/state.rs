use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to handlers through `State<AppState>`.
///
/// Cloned per request; the pool is internally shared and the config sits
/// behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: tareas_db::DbPool,
    /// Immutable process configuration.
    pub config: Arc<ServerConfig>,
}
