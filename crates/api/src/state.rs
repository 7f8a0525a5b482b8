use std::sync::Arc;

use deskbook_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: deskbook_db::DbPool,
    /// Server configuration, including the JWT secret and booking policy.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for booking rules. Tests freeze it.
    pub clock: Arc<dyn Clock>,
}
