//! Provider API key lookup
//!
//! Keys are resolved on every request rather than at startup: an operator
//! can rotate or add a key without restarting, and a missing key only fails
//! the requests that need it.

use crate::core::config::Config;
use crate::core::provider::ProviderKind;

/// Source of provider API keys
pub trait KeySource: Send + Sync {
    /// Key for `kind`, or `None` when not configured
    fn api_key(&self, kind: ProviderKind) -> Option<String>;
}

/// Reads keys from environment variables named in the configuration
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    openai_var: String,
    anthropic_var: String,
}

impl EnvKeySource {
    pub fn new(openai_var: impl Into<String>, anthropic_var: impl Into<String>) -> Self {
        Self {
            openai_var: openai_var.into(),
            anthropic_var: anthropic_var.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai.api_key_env.clone(),
            config.anthropic.api_key_env.clone(),
        )
    }

    fn var_for(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAI => &self.openai_var,
            ProviderKind::Anthropic => &self.anthropic_var,
        }
    }
}

impl KeySource for EnvKeySource {
    fn api_key(&self, kind: ProviderKind) -> Option<String> {
        std::env::var(self.var_for(kind))
            .ok()
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::StaticKeySource;

    #[test]
    fn test_env_source_reads_named_variable() {
        // PATH is set in every test environment; the unlikely name is not.
        let source = EnvKeySource::new("PATH", "MENTOR_GATEWAY_TEST_UNSET_KEY_VAR");
        assert!(source.api_key(ProviderKind::OpenAI).is_some());
        assert!(source.api_key(ProviderKind::Anthropic).is_none());
    }

    #[test]
    fn test_static_source() {
        let source = StaticKeySource::new().with_key(ProviderKind::Anthropic, "sk-ant");
        assert_eq!(
            source.api_key(ProviderKind::Anthropic).as_deref(),
            Some("sk-ant")
        );
        assert!(source.api_key(ProviderKind::OpenAI).is_none());
    }
}
