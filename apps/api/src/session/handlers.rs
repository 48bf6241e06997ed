//! Axum route handlers for resume questions and conversation history.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::build_query_prompt;
use crate::sections::query::relevant_section;
use crate::sections::segmenter::{BoundaryPolicy, SectionSegmenter};
use crate::sections::SectionLabel;
use crate::session::{ConversationTurn, Role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// File name of the document the query was answered against.
    pub document: Option<String>,
    /// Label of the resume section the query matched, if any.
    pub section_label: Option<SectionLabel>,
    /// Body of that section; null when no section matched.
    pub section: Option<String>,
    pub answer: String,
    pub history: Vec<ConversationTurn>,
}

/// POST /api/v1/query
///
/// Matches the query to a section of the current document, sends the matched
/// section plus any knowledge-base reference to the chat model, and records
/// both turns. The whole document is sent when no section matches or the
/// matched section is empty.
pub async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let (document, document_text) = {
        let mut session = state.session.write().await;
        session.push_turn(Role::User, query);
        (
            session.document_name().map(str::to_string),
            session.document_text().to_string(),
        )
    };
    if document_text.is_empty() {
        warn!("Query received before any document was uploaded");
    }

    let sections =
        SectionSegmenter::standard().segment(&document_text, BoundaryPolicy::AfterHeading);
    let matched = relevant_section(&sections, query);
    let section_label = matched.map(|(label, _)| label);
    let section = matched.map(|(_, body)| body);

    let reference = state.knowledge.reference_for(query).map(|r| {
        info!("Using {} guidance from {}", r.section, r.document);
        (r.section.name(), r.body)
    });
    // An empty matched section falls back to the whole document.
    let context = section.filter(|body| !body.is_empty()).unwrap_or(&document_text);
    let prompt = build_query_prompt(reference, context, query);

    let answer = state
        .chat
        .complete(&prompt, &state.config.chat_model)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;
    info!("Answered query (matched section: {section_label:?})");

    let history = {
        let mut session = state.session.write().await;
        session.push_turn(Role::Ai, answer.clone());
        session.history().to_vec()
    };

    Ok(Json(QueryResponse {
        document,
        section_label,
        section: section.map(str::to_string),
        answer,
        history,
    }))
}

/// GET /api/v1/history
pub async fn handle_history(State(state): State<AppState>) -> Json<Vec<ConversationTurn>> {
    Json(state.session.read().await.history().to_vec())
}
