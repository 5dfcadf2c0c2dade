//! Text-generation seam and its OpenAI-compatible implementation.
//!
//! Calls are blocking and unbatched: one request per vehicle, no retry and
//! no request timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::prompt::GenerationRequest;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response carried no generated text")]
    EmptyResponse,
}

/// Anything that can turn a chat request into text.
///
/// Object-safe so the worker thread can hold an `Arc<dyn TextGenerator>`.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Client for `/chat/completions` on OpenAI or any compatible endpoint.
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl TextGenerator for OpenAiGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });

        log::debug!("Requesting completion from {} with model {}", self.base_url, request.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let parsed: CompletionResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }
}
