use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::JobListing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobListing>,
}

/// GET /api/v1/jobs?query=&location=
pub async fn handle_job_search(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    let location = params.location.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() || location.is_empty() {
        return Err(AppError::Validation(
            "Please enter both a job title and location.".to_string(),
        ));
    }

    let jobs = state
        .jobs
        .search(query, location)
        .await
        .map_err(|e| AppError::JobSearch(e.to_string()))?;

    Ok(Json(JobSearchResponse { jobs }))
}
