//! Provider abstraction layer for the language-model backends
//!
//! This module defines the common trait implemented by the OpenAI-shaped and
//! Anthropic-shaped adapters, the enum that selects between them, and the
//! registry the handler dispatches through.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// Error types for provider operations
///
/// These never reach the caller; the handler logs them and answers with a
/// generic server error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Classify a non-success upstream status
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 | 403 => ProviderError::Authentication(message),
            429 => ProviderError::RateLimit(message),
            400 => ProviderError::BadRequest(message),
            code => ProviderError::ApiError {
                status: code,
                message,
            },
        }
    }
}

/// Capability shared by every language-model backend
#[async_trait]
pub trait LanguageModelProvider: Send + Sync {
    /// Generate text for `prompt` under the `system` instruction
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

/// Supported provider selectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAI, ProviderKind::Anthropic];

    /// Parse the `provider` field of a request. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "openai" => Some(ProviderKind::OpenAI),
            "anthropic" => Some(ProviderKind::Anthropic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One adapter per `ProviderKind`
#[derive(Clone)]
pub struct ProviderRegistry {
    openai: Arc<dyn LanguageModelProvider>,
    anthropic: Arc<dyn LanguageModelProvider>,
}

impl ProviderRegistry {
    pub fn new(
        openai: Arc<dyn LanguageModelProvider>,
        anthropic: Arc<dyn LanguageModelProvider>,
    ) -> Self {
        Self { openai, anthropic }
    }

    pub fn get(&self, kind: ProviderKind) -> &Arc<dyn LanguageModelProvider> {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }
}
