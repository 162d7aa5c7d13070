//! Satire Service
//!
//! Orchestrates one request: normalize → prompt → upstream → parse, with
//! the fallback generator substituted at every failure point.

use std::sync::{Arc, Mutex, PoisonError};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use super::client::{CompletionClient, OpenAIClient};
use super::models::LLMError;
use super::scenarios::satire::{PromptPair, build_prompts, parse_reply};
use crate::config::LLMConfig;
use crate::models::{RequestParameters, SatireResponse, SatireResult};
use crate::services::{fallback, normalizer};
use crate::utils::ApiResult;

/// Random source used to pick fallback templates
pub type TemplateRng = Box<dyn RngCore + Send>;

pub struct SatireService {
    /// `None` when no API key is configured
    client: Option<Arc<dyn CompletionClient>>,
    rng: Mutex<TemplateRng>,
}

impl SatireService {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, rng: TemplateRng) -> Self {
        Self { client, rng: Mutex::new(rng) }
    }

    /// Build the service from configuration. A missing credential is a
    /// valid state: every request is then answered by the fallback.
    pub fn from_config(config: &LLMConfig) -> Self {
        let client = config.credential().map(|key| {
            let client = OpenAIClient::new(key, config);
            tracing::info!("LLM enabled: model {} at {}", client.model(), client.endpoint());
            Arc::new(client) as Arc<dyn CompletionClient>
        });
        if client.is_none() {
            tracing::warn!("No API key configured, serving fallback templates only");
        }

        Self::new(client, Box::new(StdRng::from_entropy()))
    }

    /// Check if an upstream client is configured
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Handle one request body.
    ///
    /// Only validation fails; once the word is accepted the result is
    /// always a usable `{satire, type}` pair. Upstream failures are
    /// reported in the advisory `error` field.
    pub async fn generate(&self, body: &Value) -> ApiResult<SatireResponse> {
        let params = normalizer::normalize(body)?;
        tracing::debug!(
            word = %params.word,
            length = params.length.as_str(),
            style = params.style.as_str(),
            locale = %params.locale,
            "Resolved request parameters"
        );

        let Some(client) = self.client.clone() else {
            tracing::info!("No API key configured, using fallback template");
            return Ok(SatireResponse::new(self.fallback(&params), None));
        };

        match call_upstream(client, build_prompts(&params)).await {
            Ok(content) => {
                let result = parse_reply(&content, &params).unwrap_or_else(|| {
                    tracing::info!("Model reply unusable, using fallback template");
                    self.fallback(&params)
                });
                Ok(SatireResponse::new(result, None))
            },
            Err(e) => {
                tracing::warn!("Upstream call failed, using fallback template: {}", e);
                Ok(SatireResponse::new(self.fallback(&params), Some(e.to_string())))
            },
        }
    }

    fn fallback(&self, params: &RequestParameters) -> SatireResult {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        fallback::generate(params, &mut **rng)
    }
}

/// Run the upstream call on its own task; a panic inside the client
/// comes back as `LLMError::Internal`.
async fn call_upstream(
    client: Arc<dyn CompletionClient>,
    prompt: PromptPair,
) -> Result<String, LLMError> {
    tokio::spawn(async move { client.complete(&prompt).await })
        .await
        .map_err(|e| LLMError::Internal(e.to_string()))?
}
