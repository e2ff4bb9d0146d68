mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod parsing;
mod pipeline;
mod routes;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::StrategyRegistry;
use crate::llm_client::LlmClient;
use crate::parsing::ReaderRegistry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_max_retries,
        config.llm_retry_base_delay_ms,
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Document readers, one per allow-listed content type
    let readers = Arc::new(ReaderRegistry::standard());

    // Field strategies: pattern-based name/email, delegated phone/skills/
    // education/experience. Built once, read-only afterwards.
    let strategies = Arc::new(StrategyRegistry::standard(llm));
    info!("Strategy registry initialized ({} strategies)", strategies.len());

    // Build app state
    let state = AppState {
        config: config.clone(),
        readers,
        strategies,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
