//! Knowledge base — reference documents segmented once at startup.
//!
//! Loaded from the paths in `Config::knowledge_base_paths` and held in
//! `AppState`. Files that cannot be read or decoded are logged and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::documents::{extract_text, DocumentFormat};
use crate::sections::query::relevant_section;
use crate::sections::segmenter::{BoundaryPolicy, SectionMap, SectionSegmenter};
use crate::sections::SectionLabel;

#[derive(Debug, Clone)]
pub struct KnowledgeDocument {
    pub name: String,
    pub sections: SectionMap,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    documents: Vec<KnowledgeDocument>,
}

/// A knowledge-base section matched to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub document: &'a str,
    pub section: SectionLabel,
    pub body: &'a str,
}

impl KnowledgeBase {
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut knowledge = Self::default();
        for path in paths {
            match read_document(path) {
                Ok((name, text)) => {
                    knowledge.add_text(name, &text);
                    if let Some(document) = knowledge.documents.last() {
                        info!(
                            "Loaded knowledge document {} ({} sections)",
                            document.name,
                            document.sections.len()
                        );
                    }
                }
                Err(e) => warn!("Skipping knowledge document {}: {e:#}", path.display()),
            }
        }
        knowledge
    }

    /// Segments `text` and adds it as a document named `name`.
    pub fn add_text(&mut self, name: impl Into<String>, text: &str) {
        self.documents.push(KnowledgeDocument {
            name: name.into(),
            sections: SectionSegmenter::standard().segment(text, BoundaryPolicy::AfterHeading),
        });
    }

    pub fn documents(&self) -> &[KnowledgeDocument] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// First document (load order) with a section relevant to `query`.
    pub fn reference_for(&self, query: &str) -> Option<Reference<'_>> {
        self.documents.iter().find_map(|document| {
            let (section, body) = relevant_section(&document.sections, query)?;
            Some(Reference {
                document: &document.name,
                section,
                body,
            })
        })
    }
}

/// Returns the file name and decoded text of a reference document.
fn read_document(path: &Path) -> Result<(String, String)> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = extract_text(&bytes, format)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok((name, text))
}
