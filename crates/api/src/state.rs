use std::sync::Arc;

use sitework_db::{DbPool, StageService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Construction-stage service (validation, duration derivation, writes).
    pub stages: StageService,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            stages: StageService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
