//! OpenAI chat-completion wire models
//!
//! Only the request is modelled as a type. Responses are read as raw JSON so
//! that any unexpected shape yields empty text instead of a parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// `POST /chat/completions` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub max_tokens: u32,
}

/// Content of the first choice, or an empty string
pub fn completion_text(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Upstream completion id, for logging
pub fn completion_id(response: &Value) -> Option<&str> {
    response.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_choice_content() {
        let response = json!({
            "id": "x",
            "choices": [
                { "message": { "role": "assistant", "content": "Start small." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(completion_text(&response), "Start small.");
        assert_eq!(completion_id(&response), Some("x"));
    }

    #[test]
    fn test_missing_shapes_yield_empty_text() {
        for response in [
            json!({}),
            json!({ "choices": null }),
            json!({ "choices": [] }),
            json!({ "choices": {} }),
            json!({ "choices": [null] }),
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "choices": [{ "message": { "content": ["x"] } }] }),
            json!("not an object"),
        ] {
            assert_eq!(completion_text(&response), "", "response: {}", response);
        }
    }
}
