mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::generation::engine::Engine;
use crate::llm_client::{LlmClient, TextModel};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars,
    // including a missing model credential when fallback is disabled)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Initialize the model gateway; absent only in fallback-only deployments
    let model: Option<Arc<dyn TextModel>> = match &config.model_api_key {
        Some(key) => {
            info!("Model gateway initialized (model: {})", config.model_name);
            Some(Arc::new(LlmClient::new(
                key.clone(),
                config.model_name.clone(),
                config.request_timeout_secs,
            )))
        }
        None => {
            warn!("No model credential configured; serving fallback output only");
            None
        }
    };

    let engine = Arc::new(Engine::new(model, config.fallback_enabled));
    if config.fallback_enabled {
        info!("Fallback mode enabled: failed model calls serve synthetic output");
    }

    // Build app state
    let state = AppState {
        db,
        engine,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
