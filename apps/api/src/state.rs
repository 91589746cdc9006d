use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::generation::engine::Engine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The AI task engine. Holds the model gateway (absent in fallback-only
    /// deployments) and the fallback policy.
    pub engine: Arc<Engine>,
    pub config: Config,
}
