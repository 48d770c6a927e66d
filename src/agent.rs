//! LLM agent module for audience-tailored summarization.
//!
//! Uses rstructor's Gemini client for the generative call. The reply is free
//! text and is shaped by [`crate::parser`]; a failed call yields
//! [`SummaryResult::unavailable`].

use crate::config::Config;
use crate::parser::parse_response;
use crate::prompt::build_prompt;
use crate::summary::SummaryResult;
use async_trait::async_trait;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CallError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("LLM returned an empty response")]
    EmptyResponse,
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Generative text service
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a free-text completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, CallError>;
}

/// [`Generator`] backed by Google Gemini
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a generator from the agent section and API key of `config`
    pub fn from_config(config: &Config) -> Result<Self, CallError> {
        let api_key = config.api_key()?;
        Ok(Self::new(api_key, config.agent.model.as_str()))
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CallError> {
        let client = GeminiClient::new(self.api_key.as_str())
            .map_err(|e| CallError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(&self.model));

        let result = client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| CallError::RequestFailed(e.to_string()))?;

        if result.text.trim().is_empty() {
            return Err(CallError::EmptyResponse);
        }

        Ok(result.text)
    }
}

/// Summarize `text` for the `audience` label.
///
/// Never fails: a reply that cannot be parsed degrades to placeholder fields,
/// and a failed call returns the fixed unavailable result.
pub async fn summarize(
    generator: &dyn Generator,
    text: &str,
    audience: &str,
    prompt_chars: usize,
) -> SummaryResult {
    let prompt = build_prompt(text, audience, prompt_chars);

    match generator.generate(&prompt).await {
        Ok(reply) => {
            debug!(reply_chars = reply.len(), "model reply received");
            parse_response(&reply)
        }
        Err(e) => {
            warn!(error = %e, "model call failed, using fallback result");
            SummaryResult::unavailable()
        }
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        _ => GeminiModel::Gemini20Flash, // Default
    }
}
