/// LLM Client — the single point of entry for all OpenAI API calls.
///
/// Chat completions answer resume questions; the files and assistants
/// endpoints back the assistant provisioner. Calls are never retried: a
/// failure is returned to the caller, who reports it.
use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA: &str = "assistants=v1";
/// Default chat model when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no choices")]
    EmptyContent,
}

/// Chat-completion seam. `AppState` carries an `Arc<dyn ChatCompletion>`.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError>;
}

/// Files + assistants seam used by the assistant provisioner.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Uploads `contents` as a file for assistant retrieval, returning its ID.
    async fn upload_file(&self, file_name: &str, contents: String) -> Result<String, LlmError>;

    async fn create_assistant(&self, spec: &AssistantSpec<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// Assistant creation request body.
#[derive(Debug, Serialize)]
pub struct AssistantSpec<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub instructions: String,
    pub model: &'a str,
    pub tools: Vec<AssistantTool>,
    pub file_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantTool {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// OpenAI REST client shared by the chat and assistant paths.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one chat-completion call and returns the full response object.
    pub async fn call(&self, prompt: &str, model: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{OPENAI_API_BASE}/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let response: ChatResponse = check_status(response).await?.json().await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, model).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl AssistantBackend for OpenAiClient {
    async fn upload_file(&self, file_name: &str, contents: String) -> Result<String, LlmError> {
        let part = multipart::Part::text(contents)
            .file_name(file_name.to_string())
            .mime_str("application/json")?;
        let form = multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .client
            .post(format!("{OPENAI_API_BASE}/files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let created: CreatedObject = check_status(response).await?.json().await?;
        debug!("Uploaded {file_name} as {}", created.id);
        Ok(created.id)
    }

    async fn create_assistant(&self, spec: &AssistantSpec<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{OPENAI_API_BASE}/assistants"))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
            .json(spec)
            .send()
            .await?;

        let created: CreatedObject = check_status(response).await?.json().await?;
        Ok(created.id)
    }
}

/// Maps a non-2xx response to `LlmError::Api`, preferring the API's own message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: api_error_message(body),
    })
}

fn api_error_message(body: String) -> String {
    serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
