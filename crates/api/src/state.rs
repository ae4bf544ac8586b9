use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` (or by a test harness) and handed to the router;
/// handlers never reach for a global pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: techflow_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
