//! Application configuration management
//!
//! This module loads the server, upstream and identity settings from a TOML
//! file. Every value has a default, so the file itself is optional. Provider
//! API keys are deliberately absent: the file only names the environment
//! variables that hold them (see [`crate::core::keys`]).

use crate::core::constants::{endpoint, model};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default server port
const DEFAULT_PORT: u16 = 8080;

/// Default outbound request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Default config file name, relative to the working directory
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct ServerSection {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RequestSection {
    #[serde(default)]
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ProviderSection {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct IdentitySection {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    request: RequestSection,
    #[serde(default)]
    openai: ProviderSection,
    #[serde(default)]
    anthropic: ProviderSection,
    #[serde(default)]
    identity: IdentitySection,
}

/// Settings for one upstream provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key, read per request
    pub api_key_env: String,
}

impl ProviderConfig {
    fn resolve(section: ProviderSection, base_url: &str, model: &str, key_env: &str) -> Self {
        Self {
            base_url: section
                .base_url
                .unwrap_or_else(|| base_url.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: section.model.unwrap_or_else(|| model.to_string()),
            api_key_env: section.api_key_env.unwrap_or_else(|| key_env.to_string()),
        }
    }
}

/// Identity service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub base_url: String,
    /// Environment variable holding the identity service key, read once
    pub api_key_env: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Outbound request timeout in seconds, 0 for none
    pub request_timeout: u64,

    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub identity: IdentityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    fn from_toml(config: TomlConfig) -> Self {
        Config {
            host: config
                .server
                .host
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: config.server.port.unwrap_or(DEFAULT_PORT),
            log_level: config
                .server
                .log_level
                .unwrap_or_else(|| "info".to_string()),
            request_timeout: config.request.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            openai: ProviderConfig::resolve(
                config.openai,
                endpoint::OPENAI_BASE_URL,
                model::OPENAI,
                "OPENAI_API_KEY",
            ),
            anthropic: ProviderConfig::resolve(
                config.anthropic,
                endpoint::ANTHROPIC_BASE_URL,
                model::ANTHROPIC,
                "ANTHROPIC_API_KEY",
            ),
            identity: IdentityConfig {
                base_url: config
                    .identity
                    .base_url
                    .unwrap_or_else(|| endpoint::IDENTITY_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_key_env: config
                    .identity
                    .api_key_env
                    .unwrap_or_else(|| "FIREBASE_API_KEY".to_string()),
            },
        }
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let raw: TomlConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        let config = Self::from_toml(raw);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or a value is invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Load configuration from `CONFIG_PATH`, or `config.toml` if present
    ///
    /// An explicitly named file must exist. Without `CONFIG_PATH` and without
    /// a `config.toml`, defaults are used.
    pub fn from_env() -> Result<Self> {
        match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path)),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("openai.base_url", &self.openai.base_url),
            ("anthropic.base_url", &self.anthropic.base_url),
            ("identity.base_url", &self.identity.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{} must be an http(s) URL, got {:?}", name, url);
            }
        }
        for (name, value) in [
            ("openai.model", &self.openai.model),
            ("anthropic.model", &self.anthropic.model),
            ("openai.api_key_env", &self.openai.api_key_env),
            ("anthropic.api_key_env", &self.anthropic.api_key_env),
            ("identity.api_key_env", &self.identity.api_key_env),
        ] {
            if value.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }
        Ok(())
    }

    /// Read the identity service key from its configured variable
    pub fn identity_api_key(&self) -> Option<String> {
        std::env::var(&self.identity.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}
