//! Anthropic provider implementation
//!
//! Speaks the legacy text-completion protocol: one flattened prompt string in,
//! one `completion` string out.

use crate::core::constants::{header, limits};
use crate::core::provider::{LanguageModelProvider, ProviderError};
use crate::models::anthropic::{
    AnthropicCompleteRequest, completion_text, flatten_prompt, stop_reason,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Anthropic `/complete` provider
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn build_request(&self, system: &str, prompt: &str) -> AnthropicCompleteRequest {
        AnthropicCompleteRequest {
            model: self.model.clone(),
            prompt: flatten_prompt(system, prompt),
            max_tokens_to_sample: limits::MAX_TOKENS,
        }
    }
}

#[async_trait]
impl LanguageModelProvider for AnthropicProvider {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(system, prompt);
        let url = format!("{}/complete", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::API_KEY, api_key)
            .header(header::ANTHROPIC_VERSION, header::ANTHROPIC_VERSION_VALUE)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::from_status(status, error_text));
        }

        let completion: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            "Anthropic completion received: stop_reason={:?}",
            stop_reason(&completion)
        );

        Ok(completion_text(&completion))
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
