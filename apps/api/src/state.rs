use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::config::Config;
use crate::matching::scoring::CompatibilityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Rate-limiter state. `None` when Redis was unreachable at startup —
    /// the API then serves without throttling.
    pub redis: Option<ConnectionManager>,
    pub config: Config,
    /// Pluggable compatibility scorer. Default: `KeywordScorer`.
    pub scorer: Arc<dyn CompatibilityScorer>,
}
