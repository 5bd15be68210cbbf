mod compliance;
mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod optimization;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::aggregate::{AreaThresholds, ScoringWeights};
use crate::matching::MatchEngine;
use crate::optimization::enhancer::{LlmEnhancer, TextEnhancer, TimedEnhancer, UnavailableEnhancer};
use crate::optimization::Optimizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Match API v{}", env!("CARGO_PKG_VERSION"));

    // Text enhancer: Claude behind a timeout, or fallbacks only
    let enhancer: Arc<dyn TextEnhancer> = match &config.anthropic_api_key {
        Some(key) => {
            info!(
                "Text enhancement enabled (model: {}, timeout: {:?})",
                llm_client::MODEL,
                config.enhancement_timeout
            );
            Arc::new(TimedEnhancer::new(
                LlmEnhancer(LlmClient::new(key.clone())),
                config.enhancement_timeout,
            ))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; optimization will use deterministic fallbacks");
            Arc::new(UnavailableEnhancer)
        }
    };

    let engine = MatchEngine::new(ScoringWeights::default(), AreaThresholds::default());
    let state = AppState {
        config: config.clone(),
        engine,
        optimizer: Arc::new(Optimizer::new(engine, enhancer)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a web client exists

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
