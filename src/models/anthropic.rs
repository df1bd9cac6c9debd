//! Anthropic legacy text-completion wire models
//!
//! The `/v1/complete` protocol takes one flattened prompt string and returns
//! the generated text in a single `completion` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /complete` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicCompleteRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens_to_sample: u32,
}

/// `completion` field of a response, or an empty string
pub fn completion_text(response: &Value) -> String {
    response
        .get("completion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `stop_reason` field, for logging
pub fn stop_reason(response: &Value) -> Option<&str> {
    response.get("stop_reason").and_then(Value::as_str)
}

/// Build the `System: ...\nHuman: ...\nAssistant:` prompt
pub fn flatten_prompt(system: &str, prompt: &str) -> String {
    format!("System: {}\nHuman: {}\nAssistant:", system, prompt)
}
