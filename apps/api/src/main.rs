mod assistant;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::generator::Assistant;
use crate::assistant::history::ConversationStore;
use crate::config::Config;
use crate::llm_client::{CompletionClient, GroqClient};
use crate::models::resume::ResumeFacts;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Tracing targets use the underscored crate name, not the package name.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Load the bundled resume data once; it is immutable for the process lifetime.
    let resume = ResumeFacts::bundled()?;
    info!(
        "Resume data loaded ({} experience entries, {} projects, {} skill categories)",
        resume.experience.len(),
        resume.projects.len(),
        resume.skills.len()
    );

    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; chat requests will fail until it is configured");
    }
    let completions: Arc<dyn CompletionClient> = Arc::new(GroqClient::new(
        config.groq_api_key.clone(),
        config.groq_model.clone(),
    ));
    info!("Completion client initialized (model: {})", config.groq_model);

    let state = AppState {
        assistant: Assistant::new(resume, completions),
        conversations: ConversationStore::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
