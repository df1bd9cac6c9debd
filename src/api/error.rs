//! Caller-facing error taxonomy
//!
//! Each variant maps to one HTTP status and one fixed `{"error": ...}` body.
//! Upstream and internal failures all collapse into [`ApiError::Server`]; the
//! detail is logged where it happens and never returned to the caller.

use crate::core::constants::message;
use crate::core::provider::ProviderKind;
use crate::models::mentor::ErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("bearer token rejected by identity verifier")]
    InvalidToken,

    #[error("request body is not valid JSON for this endpoint")]
    InvalidBody,

    #[error("prompt is empty or absent")]
    MissingPrompt,

    #[error("provider is not recognised")]
    UnknownProvider,

    #[error("no API key configured for {0}")]
    ProviderNotConfigured(ProviderKind),

    #[error("internal server error")]
    Server,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody | ApiError::MissingPrompt | ApiError::UnknownProvider => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ProviderNotConfigured(_) | ApiError::Server => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `error` field
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingToken => message::MISSING_TOKEN,
            ApiError::InvalidToken => message::INVALID_TOKEN,
            ApiError::InvalidBody => message::INVALID_BODY,
            ApiError::MissingPrompt => message::PROMPT_REQUIRED,
            ApiError::UnknownProvider => message::UNKNOWN_PROVIDER,
            ApiError::ProviderNotConfigured(ProviderKind::OpenAI) => {
                message::OPENAI_NOT_CONFIGURED
            }
            ApiError::ProviderNotConfigured(ProviderKind::Anthropic) => {
                message::ANTHROPIC_NOT_CONFIGURED
            }
            ApiError::Server => message::SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
