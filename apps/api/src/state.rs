use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::jobs::JobSearch;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::{AssistantBackend, ChatCompletion};
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatCompletion>,
    pub assistants: Arc<dyn AssistantBackend>,
    pub jobs: Arc<dyn JobSearch>,
    /// Reference documents, segmented once at startup.
    pub knowledge: Arc<KnowledgeBase>,
    /// Single-user session; requests touching it take the lock briefly.
    pub session: Arc<RwLock<Session>>,
    pub config: Config,
}
