mod assistant;
mod config;
mod documents;
mod errors;
mod jobs;
mod knowledge;
mod llm_client;
mod routes;
mod sections;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::IndeedClient;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Knowledge base is segmented once and shared read-only
    let knowledge = KnowledgeBase::load(&config.knowledge_base_paths);
    if knowledge.is_empty() {
        info!("No knowledge base documents configured");
    } else {
        info!(
            "Knowledge base ready ({} documents)",
            knowledge.documents().len()
        );
    }

    let openai = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("OpenAI client initialized (model: {})", config.chat_model);

    let jobs = Arc::new(IndeedClient::new(config.rapidapi_key.clone()));

    let state = AppState {
        chat: openai.clone(),
        assistants: openai,
        jobs,
        knowledge: Arc::new(knowledge),
        session: Arc::new(RwLock::new(Session::default())),
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
