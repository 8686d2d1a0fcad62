mod ai;
mod config;
mod errors;
mod llm_client;
mod models;
mod portal;
mod routes;
mod seed;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::adapter::AiAdapter;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerStream v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client behind the AI adapter
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    let ai = AiAdapter::new(Arc::new(llm));
    info!(
        "AI adapter initialized (models: {}, {})",
        llm_client::TEXT_MODEL,
        llm_client::SCORING_MODEL
    );

    // Seed the demo session
    let store = Store::seeded();
    let (jobs, companies) = store.read(|s| (s.jobs.len(), s.companies.len())).await;
    info!("Demo session seeded: {jobs} jobs, {companies} companies");

    let state = AppState { store, ai };

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
