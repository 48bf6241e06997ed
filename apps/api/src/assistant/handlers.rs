use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::warn;

use crate::assistant::{ensure_assistant, AssistantCache, AssistantOutcome, AssistantRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    pub name: String,
    pub description: String,
    pub model: Option<String>,
}

/// POST /api/v1/assistant
///
/// Reuses the cached assistant or creates one over the knowledge base.
/// The ID is written to the cache only when a new assistant was created.
pub async fn handle_provision_assistant(
    State(state): State<AppState>,
    Json(request): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<AssistantOutcome>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let cache_path = &state.config.assistant_cache_path;
    let outcome = ensure_assistant(
        state.assistants.as_ref(),
        &state.knowledge,
        cache_path,
        AssistantRequest {
            name: &request.name,
            description: &request.description,
            model: request.model.as_deref().unwrap_or(&state.config.chat_model),
        },
    )
    .await;

    let status = match &outcome {
        AssistantOutcome::Created { assistant_id } => {
            let cache = AssistantCache {
                assistant_id: assistant_id.clone(),
            };
            if let Err(e) = cache.save(cache_path).await {
                warn!("Assistant created but not cached: {e:#}");
            }
            StatusCode::CREATED
        }
        AssistantOutcome::Existing { .. } => StatusCode::OK,
        AssistantOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };

    Ok((status, Json(outcome)))
}
