//! Job search — queries the RapidAPI Indeed endpoint for recent listings.
//!
//! One page, jobs from the last 3 days, 50 mile radius. No retries; a non-200
//! status surfaces as `JobSearchError::Status` with the upstream body.

pub mod handlers;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const INDEED_SEARCH_URL: &str = "https://indeed12.p.rapidapi.com/jobs/search";
const INDEED_HOST: &str = "indeed12.p.rapidapi.com";
const PAGE_ID: &str = "1";
const POSTED_WITHIN_DAYS: &str = "3";
const RADIUS_MILES: &str = "50";

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to search jobs: status code {status} ({body})")]
    Status { status: u16, body: String },

    #[error("Unreadable job search response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A listing as shown to the user. Missing upstream fields are filled with
/// their display defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs: Vec<RawJob>,
}

impl From<RawJob> for JobListing {
    fn from(raw: RawJob) -> Self {
        Self {
            title: raw.title.unwrap_or_else(|| "No Title".to_string()),
            company: raw.company.unwrap_or_else(|| "No Company".to_string()),
            location: raw.location.unwrap_or_else(|| "No Location".to_string()),
            snippet: raw.snippet.unwrap_or_else(|| "No Description".to_string()),
            url: raw.url.unwrap_or_else(|| "#".to_string()),
        }
    }
}

/// Job search seam. `AppState` carries an `Arc<dyn JobSearch>`.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self, query: &str, location: &str) -> Result<Vec<JobListing>, JobSearchError>;
}

#[derive(Clone)]
pub struct IndeedClient {
    client: Client,
    api_key: String,
}

impl IndeedClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl JobSearch for IndeedClient {
    async fn search(&self, query: &str, location: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let response = self
            .client
            .get(INDEED_SEARCH_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", INDEED_HOST)
            .query(&[
                ("query", query),
                ("location", location),
                ("page_id", PAGE_ID),
                ("fromage", POSTED_WITHIN_DAYS),
                ("radius", RADIUS_MILES),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            error!("Job search returned {status}: {body}");
            return Err(JobSearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let listings = parse_listings(&response.text().await?)?;
        info!("Job search for '{query}' in '{location}' returned {} listings", listings.len());
        Ok(listings)
    }
}

fn parse_listings(body: &str) -> Result<Vec<JobListing>, JobSearchError> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    Ok(parsed.jobs.into_iter().map(JobListing::from).collect())
}
