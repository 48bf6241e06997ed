//! Axum route handlers for segmentation and document upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::documents::{extract_text, DocumentFormat};
use crate::errors::AppError;
use crate::sections::segmenter::{BoundaryPolicy, SectionMap, SectionSegmenter};
use crate::sections::suggestions::{suggest_improvements, SectionSuggestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub text: String,
    #[serde(default)]
    pub boundary: BoundaryPolicy,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub sections: SectionMap,
}

#[derive(Debug, Serialize)]
pub struct DocumentAnalysis {
    pub file_name: String,
    pub format: DocumentFormat,
    pub sections: SectionMap,
    pub suggestions: Vec<SectionSuggestion>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub documents: Vec<DocumentAnalysis>,
}

/// POST /api/v1/sections
///
/// Segments raw text. Never fails on content: text without headings yields
/// an empty map.
pub async fn handle_segment(Json(request): Json<SegmentRequest>) -> Json<SegmentResponse> {
    let sections = SectionSegmenter::standard().segment(&request.text, request.boundary);
    Json(SegmentResponse { sections })
}

/// POST /api/v1/documents
///
/// Accepts one or more resume files (multipart). Each is decoded, segmented
/// and given suggestions; the last one becomes the session's current document.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut documents = Vec::new();
    let mut latest: Option<(String, String)> = None;

    while let Some(field) = multipart.next_field().await? {
        // Plain form fields carry no file name.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let format = DocumentFormat::detect(&file_name, field.content_type())?;
        let bytes = field.bytes().await?;

        let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        let sections = SectionSegmenter::standard().segment(&text, BoundaryPolicy::AfterHeading);
        if sections.is_empty() {
            warn!("No section headings recognized in {file_name}");
        }
        let suggestions = suggest_improvements(&sections);
        info!(
            "Analyzed {file_name} ({format:?}): {} sections",
            sections.len()
        );

        documents.push(DocumentAnalysis {
            file_name: file_name.clone(),
            format,
            sections,
            suggestions,
        });
        latest = Some((file_name, text));
    }

    let Some((file_name, text)) = latest else {
        return Err(AppError::Validation(
            "Upload at least one PDF, Word or text file".to_string(),
        ));
    };
    state.session.write().await.set_document(file_name, text);

    Ok(Json(UploadResponse { documents }))
}
