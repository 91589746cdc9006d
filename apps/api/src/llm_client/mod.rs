//! Model Gateway: the single point of entry for all text-generation calls.
//!
//! No other module may talk to the model API directly. The gateway is
//! stateless and safe to call concurrently. It performs no retries; a failed
//! call surfaces as one `ModelUnavailable` error carrying the cause, and the
//! caller (the engine) decides between fallback and terminal failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Transport, auth, service, or malformed-response failure from the
/// generation call. All failure modes collapse into this one type.
#[derive(Debug, Error)]
#[error("model unavailable: {reason}")]
pub struct ModelUnavailable {
    pub reason: String,
}

impl ModelUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ModelUnavailable {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Per-call generation knobs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.4,
        }
    }
}

/// The text-generation seam. `LlmClient` is the production implementation;
/// tests drive the engine with stub models.
///
/// Carried in the engine as `Arc<dyn TextModel>`.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: GenerationParams,
    ) -> Result<String, ModelUnavailable>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Production gateway over the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextModel for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: GenerationParams,
    ) -> Result<String, ModelUnavailable> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured error message when the body parses
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ModelUnavailable::new(format!(
                "API error (status {}): {message}",
                status.as_u16()
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelUnavailable::new(format!("malformed response body: {e}")))?;

        debug!(
            "model call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed
            .text()
            .map(str::to_owned)
            .ok_or_else(|| ModelUnavailable::new("model returned no text content"))
    }
}
