//! Inbound and outbound bodies of the `/mentor` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /mentor`
///
/// Fields are kept as raw JSON: a prompt of the wrong type is treated like a
/// missing one, and a provider of the wrong type like an unknown one, rather
/// than rejecting the whole body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorRequest {
    pub prompt: Value,
    pub provider: Value,
}

impl MentorRequest {
    /// Read the fields out of a parsed body. Non-object bodies carry no fields.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                prompt: fields.remove("prompt").unwrap_or(Value::Null),
                provider: fields.remove("provider").unwrap_or(Value::Null),
            },
            _ => Self::default(),
        }
    }

    /// Prompt text, or `None` when the prompt is absent or falsy
    ///
    /// Truthy non-string prompts are forwarded as their JSON text.
    pub fn prompt_text(&self) -> Option<String> {
        if !is_truthy(&self.prompt) {
            return None;
        }
        match &self.prompt {
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// `null`, `false`, `0` and `""` are falsy; everything else is truthy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Successful reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorResponse {
    pub response: String,
}

/// Error reply, `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields() {
        let request = MentorRequest::from_json(json!({}));
        assert!(request.prompt_text().is_none());
        assert_eq!(request.provider, Value::Null);
    }

    #[test]
    fn test_null_provider_counts_as_absent() {
        let request = MentorRequest::from_json(json!({ "prompt": "hi", "provider": null }));
        assert_eq!(request.prompt_text().as_deref(), Some("hi"));
        assert_eq!(request.provider, Value::Null);
    }

    #[test]
    fn test_falsy_prompts() {
        for prompt in [json!(null), json!(""), json!(false), json!(0), json!(0.0)] {
            let request = MentorRequest::from_json(json!({ "prompt": prompt }));
            assert!(request.prompt_text().is_none(), "prompt: {}", prompt);
        }
    }

    #[test]
    fn test_truthy_non_string_prompt_is_stringified() {
        let request = MentorRequest::from_json(json!({ "prompt": 42 }));
        assert_eq!(request.prompt_text().as_deref(), Some("42"));
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let request = MentorRequest::from_json(json!(["hi", "openai"]));
        assert_eq!(request, MentorRequest::default());
    }
}
