mod config;
mod contacts;
mod errors;
mod extraction;
mod llm_client;
mod outreach;
mod pipeline;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contacts::HunterClient;
use crate::llm_client::LlmClient;
use crate::outreach::SmtpMailer;
use crate::pipeline::Workflow;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Application Assistant v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize contact lookup
    let hunter = HunterClient::new(config.hunter_api_key.clone(), config.hunter_api_url.clone())?;
    if config.hunter_api_key.is_none() {
        warn!("HUNTER_API_KEY not set; contact lookup will be skipped");
    }

    let mailer = SmtpMailer::new(config.smtp.clone());
    if !mailer.is_configured() {
        warn!("SMTP credentials not set; /api/v1/outreach/send is disabled");
    }

    let workflow = Workflow::standard(llm, hunter);
    info!("Pipeline stages: {}", workflow.stage_names().join(" -> "));

    // Build app state
    let state = AppState {
        workflow,
        mailer,
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
