//! Fixed values shared by the mentor handler and the provider adapters
//!
//! This module defines the system instruction, message roles, default model
//! identifiers, token caps, upstream endpoints and the error messages returned
//! to callers.

/// System instruction sent to every provider, identical for both branches
pub const MENTOR_SYSTEM_PROMPT: &str = "You are a helpful mentor.";

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";

    /// System role identifier
    pub const SYSTEM: &str = "system";
}

/// Generation limits
pub mod limits {
    /// Token cap for every outbound generation call
    pub const MAX_TOKENS: u32 = 500;
}

/// Default model identifiers
pub mod model {
    /// Chat-completion model used by the OpenAI branch
    pub const OPENAI: &str = "gpt-4o-mini";

    /// Legacy completion model used by the Anthropic branch
    pub const ANTHROPIC: &str = "claude-2.1";
}

/// Default upstream base URLs
pub mod endpoint {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

    /// Firebase Identity Toolkit, used to verify ID tokens
    pub const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
}

/// Upstream header names and values
pub mod header {
    pub const API_KEY: &str = "x-api-key";

    pub const ANTHROPIC_VERSION: &str = "anthropic-version";

    /// Version pinned for the legacy `/v1/complete` endpoint
    pub const ANTHROPIC_VERSION_VALUE: &str = "2023-06-01";
}

/// Inbound authentication scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error messages surfaced to callers
pub mod message {
    pub const MISSING_TOKEN: &str = "Missing token";
    pub const INVALID_TOKEN: &str = "Invalid token";
    pub const INVALID_BODY: &str = "invalid request body";
    pub const PROMPT_REQUIRED: &str = "prompt required";
    pub const UNKNOWN_PROVIDER: &str = "unknown provider";
    pub const OPENAI_NOT_CONFIGURED: &str = "OpenAI key not configured";
    pub const ANTHROPIC_NOT_CONFIGURED: &str = "Anthropic key not configured";
    pub const SERVER_ERROR: &str = "server error";
}
