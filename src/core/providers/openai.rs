//! OpenAI provider implementation

use crate::core::constants::{limits, role};
use crate::core::provider::{LanguageModelProvider, ProviderError};
use crate::models::openai::{
    OpenAIChatCompletionRequest, OpenAIMessage, completion_id, completion_text,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// OpenAI chat-completion provider
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `base_url` - API base URL, without the `/chat/completions` suffix
    /// * `model` - Model identifier sent with every request
    pub fn new(client: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn build_request(&self, system: &str, prompt: &str) -> OpenAIChatCompletionRequest {
        OpenAIChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: role::SYSTEM.to_string(),
                    content: system.to_string(),
                },
                OpenAIMessage {
                    role: role::USER.to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: limits::MAX_TOKENS,
        }
    }

    /// Turn an OpenAI error body into an operator-facing hint
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("unsupported_country_region_territory") {
            return "OpenAI API is not available in this region".to_string();
        }

        if error_lower.contains("invalid_api_key") || error_lower.contains("incorrect api key") {
            return "Invalid OpenAI API key".to_string();
        }

        if error_lower.contains("insufficient_quota") || error_lower.contains("billing") {
            return "OpenAI quota exhausted or billing issue".to_string();
        }

        if error_lower.contains("model_not_found") {
            return "Configured OpenAI model not found".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl LanguageModelProvider for OpenAIProvider {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(system, prompt);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
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
            return Err(ProviderError::from_status(
                status,
                Self::classify_error(&error_text),
            ));
        }

        let completion: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            "OpenAI completion received: id={:?}",
            completion_id(&completion)
        );

        Ok(completion_text(&completion))
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MENTOR_SYSTEM_PROMPT;
    use crate::core::test_support::{spawn_upstream, unreachable_base_url};
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;

    async fn upstream(reply: Value) -> (String, Captured) {
        let seen: Captured = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                let reply = reply.clone();
                async move {
                    *captured.lock().await = Some((headers, body));
                    Json(reply)
                }
            }),
        );
        (spawn_upstream(router).await, seen)
    }

    #[tokio::test]
    async fn test_sends_chat_completion_shape() {
        let (base_url, seen) = upstream(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Start small." } }]
        }))
        .await;
        let provider = OpenAIProvider::new(Client::new(), base_url, "gpt-4o-mini");

        let text = provider
            .generate(MENTOR_SYSTEM_PROMPT, "How do I start a startup?", "sk-test")
            .await
            .unwrap();
        assert_eq!(text, "Start small.");

        let (headers, body) = seen.lock().await.take().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-test");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(
            body["messages"],
            json!([
                { "role": "system", "content": "You are a helpful mentor." },
                { "role": "user", "content": "How do I start a startup?" }
            ])
        );
    }

    #[tokio::test]
    async fn test_unexpected_shapes_are_empty_text() {
        for reply in [
            json!({ "choices": [] }),
            json!({ "choices": {} }),
            json!({ "choices": [null] }),
            json!({ "choices": [{ "message": { "content": ["x"] } }] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
        ] {
            let (base_url, _) = upstream(reply.clone()).await;
            let provider = OpenAIProvider::new(Client::new(), base_url, "gpt-4o-mini");
            let text = provider.generate("s", "p", "k").await.unwrap();
            assert_eq!(text, "", "reply: {}", reply);
        }
    }

    #[tokio::test]
    async fn test_error_status_is_classified() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    r#"{"error":{"code":"invalid_api_key"}}"#,
                )
            }),
        );
        let provider =
            OpenAIProvider::new(Client::new(), spawn_upstream(router).await, "gpt-4o-mini");

        let err = provider.generate("s", "p", "bad").await.unwrap_err();
        assert!(matches!(err, ProviderError::Authentication(ref m) if m.contains("API key")));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let provider =
            OpenAIProvider::new(Client::new(), unreachable_base_url().await, "gpt-4o-mini");
        let err = provider.generate("s", "p", "k").await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn test_classify_region_error() {
        let result = OpenAIProvider::classify_error("unsupported_country_region_territory");
        assert!(result.contains("region"));
    }
}
