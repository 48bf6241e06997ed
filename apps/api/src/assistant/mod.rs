//! Assistant provisioner — creates (or reuses) a retrieval assistant seeded
//! with the knowledge base's section maps.
//!
//! The outcome is returned, never persisted here: the caller writes the
//! cache only for `AssistantOutcome::Created`.

pub mod handlers;

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::knowledge::KnowledgeBase;
use crate::llm_client::prompts::ASSISTANT_INSTRUCTIONS;
use crate::llm_client::{AssistantBackend, AssistantSpec, AssistantTool};

/// On-disk cache of the provisioned assistant's ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantCache {
    pub assistant_id: String,
}

impl AssistantCache {
    /// `Ok(None)` when no cache file exists yet.
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        let raw = match tokio::fs::read_to_string(path).await {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            other => other.with_context(|| format!("reading assistant cache {}", path.display()))?,
        };
        let cache = serde_json::from_str(&raw)
            .with_context(|| format!("parsing assistant cache {}", path.display()))?;
        Ok(Some(cache))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing assistant cache {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssistantOutcome {
    Existing { assistant_id: String },
    Created { assistant_id: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy)]
pub struct AssistantRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub model: &'a str,
}

/// Returns the cached assistant if there is one, otherwise uploads every
/// knowledge document and creates a new assistant over them.
pub async fn ensure_assistant(
    backend: &dyn AssistantBackend,
    knowledge: &KnowledgeBase,
    cache_path: &Path,
    request: AssistantRequest<'_>,
) -> AssistantOutcome {
    match AssistantCache::load(cache_path).await {
        Ok(Some(cache)) => {
            info!("Loaded existing assistant ID");
            return AssistantOutcome::Existing {
                assistant_id: cache.assistant_id,
            };
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error in creating assistant: {e:#}");
            return AssistantOutcome::Failed {
                reason: format!("{e:#}"),
            };
        }
    }

    match create_assistant(backend, knowledge, request).await {
        Ok(assistant_id) => {
            info!("Created a new assistant {assistant_id}");
            AssistantOutcome::Created { assistant_id }
        }
        Err(e) => {
            error!("Error in creating assistant: {e:#}");
            AssistantOutcome::Failed {
                reason: format!("{e:#}"),
            }
        }
    }
}

async fn create_assistant(
    backend: &dyn AssistantBackend,
    knowledge: &KnowledgeBase,
    request: AssistantRequest<'_>,
) -> Result<String> {
    let mut file_ids = Vec::with_capacity(knowledge.documents().len());
    for document in knowledge.documents() {
        let contents = serde_json::to_string(&document.sections)?;
        let file_id = backend
            .upload_file(&format!("{}.json", document.name), contents)
            .await
            .with_context(|| format!("uploading knowledge document {}", document.name))?;
        file_ids.push(file_id);
    }

    let spec = AssistantSpec {
        name: request.name,
        description: request.description,
        instructions: format!("{} {ASSISTANT_INSTRUCTIONS}", request.description),
        model: request.model,
        tools: vec![AssistantTool {
            tool_type: "retrieval",
        }],
        file_ids,
    };

    backend
        .create_assistant(&spec)
        .await
        .context("creating assistant")
}
