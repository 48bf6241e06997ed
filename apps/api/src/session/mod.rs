//! Single-user session: the current resume text and the conversation history.
//! Held in `AppState` behind an async `RwLock`.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Session {
    document_name: Option<String>,
    document_text: String,
    /// Grows for the life of the process. Never trimmed since there is one user.
    history: Vec<ConversationTurn>,
}

impl Session {
    /// Replaces the current document. History is kept.
    pub fn set_document(&mut self, name: impl Into<String>, text: String) {
        self.document_name = Some(name.into());
        self.document_text = text;
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// Empty until a document is uploaded.
    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn push_turn(&mut self, role: Role, text: impl Into<String>) {
        self.history.push(ConversationTurn {
            role,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }
}
