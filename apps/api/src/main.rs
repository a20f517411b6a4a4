mod ai_client;
mod config;
mod errors;
mod models;
mod recommend;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::AiClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgCandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skillpath_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillpath API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate store (PostgreSQL)
    let store = Arc::new(PgCandidateStore::connect(&config.database_url).await?);

    // AI gateway
    let ai = Arc::new(AiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.mock_mode,
        config.ai_timeout_secs,
    ));
    info!(
        "AI gateway initialized (model: {}, mock_mode: {}, credential: {})",
        config.gemini_model,
        config.mock_mode,
        if config.gemini_api_key.is_some() {
            "set"
        } else {
            "missing — AI mode will fall back to keyword"
        }
    );

    let state = AppState {
        store,
        ai,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
