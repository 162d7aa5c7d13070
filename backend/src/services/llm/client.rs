//! Upstream completion client
//!
//! One outbound call per request: system + user message, optional JSON
//! response mode, no retries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LLMError, ResponseFormat};
use super::scenarios::satire::PromptPair;
use crate::config::LLMConfig;

/// Content returned when the first choice carries no message text
pub const EMPTY_PAYLOAD: &str = "{}";

/// A chat-completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the prompt pair and return the raw content of the first choice.
    async fn complete(&self, prompt: &PromptPair) -> Result<String, LLMError>;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAIClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    json_mode: bool,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, config: &LLMConfig) -> Self {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder.build().unwrap_or_default();

        Self {
            http_client,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            json_mode: config.json_mode,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &PromptPair) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(&prompt.system), ChatMessage::user(&prompt.user)],
            temperature: self.temperature,
            response_format: self.json_mode.then(ResponseFormat::json_object),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &PromptPair) -> Result<String, LLMError> {
        let request = self.build_request(prompt);
        tracing::debug!("Calling {} with model {}", self.endpoint, self.model);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Upstream { status: status.as_u16(), body });
        }

        let envelope: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        Ok(envelope.first_content().unwrap_or(EMPTY_PAYLOAD).to_string())
    }
}
