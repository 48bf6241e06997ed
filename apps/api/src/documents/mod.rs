//! Document decoder — turns uploaded bytes into plain text.
//!
//! PDF goes through `pdf-extract`, Word through `docx-rs` (body paragraphs
//! joined by newlines), plain text must be UTF-8. Layout is not preserved.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word extraction failed: {0}")]
    Docx(String),

    #[error("Document is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Picks a format from the upload's content type, falling back to the
    /// file extension when the content type is missing or generic.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, DecodeError> {
        match content_type.map(|ct| ct.split(';').next().unwrap_or(ct).trim()) {
            Some(PDF_MIME) => return Ok(DocumentFormat::Pdf),
            Some(DOCX_MIME) => return Ok(DocumentFormat::Docx),
            Some(ct) if ct.starts_with("text/") => return Ok(DocumentFormat::PlainText),
            _ => {}
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some("txt") | Some("md") => Ok(DocumentFormat::PlainText),
            _ => Err(DecodeError::Unsupported(format!(
                "{file_name} ({})",
                content_type.unwrap_or("no content type")
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DecodeError> {
        Self::detect(&path.to_string_lossy(), None)
    }
}

/// Extracts plain text from a document held in memory.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, DecodeError> {
    match format {
        DocumentFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodeError::Pdf(e.to_string()))
        }
        DocumentFormat::Docx => extract_docx_text(bytes),
        DocumentFormat::PlainText => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

/// Body paragraphs only; table cells and headers are skipped.
fn extract_docx_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DecodeError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}
