mod auth;
mod config;
mod db;
mod errors;
mod faculty;
mod matching;
mod models;
mod ratelimit;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use redis::aio::ConnectionManager;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::matching::scoring::KeywordScorer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("faculty_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Faculty Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;
    auth::seed::ensure_admin(&pool, &config).await?;

    // Initialize Redis for rate limiting. The API keeps serving without
    // throttling if the cache server is down — not recommended in production.
    let redis = connect_redis(&config.redis_url).await;

    // Build app state
    let state = AppState {
        db: pool,
        redis,
        config: config.clone(),
        scorer: Arc::new(KeywordScorer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn connect_redis(redis_url: &str) -> Option<ConnectionManager> {
    let client = match redis::Client::open(redis_url) {
        Ok(client) => client,
        Err(e) => {
            warn!("Invalid REDIS_URL, rate limiting disabled: {e}");
            return None;
        }
    };
    match ConnectionManager::new(client).await {
        Ok(conn) => {
            info!("Redis connection established for rate limiting");
            Some(conn)
        }
        Err(e) => {
            warn!("Could not connect to Redis, rate limiting disabled: {e}");
            None
        }
    }
}
