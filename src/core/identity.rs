//! Caller identity verification
//!
//! The gateway does not issue or decode tokens itself. A bearer token is
//! handed to an [`IdentityVerifier`], whose verdict is trusted as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityClaim {
    pub uid: String,
    pub email: Option<String>,
    /// Full record returned by the verifier
    pub raw: Value,
}

/// Verification failures. The gateway maps all of them to `Invalid token`.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Token rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed verifier response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<IdentityClaim, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<Value>,
}

/// Verifies Firebase ID tokens through the Identity Toolkit `accounts:lookup` call
pub struct FirebaseVerifier {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FirebaseVerifier {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn claim_from_user(user: Value) -> Result<IdentityClaim, IdentityError> {
        let uid = user
            .get("localId")
            .and_then(Value::as_str)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| IdentityError::Malformed("user record without localId".to_string()))?
            .to_string();
        let email = user
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(IdentityClaim {
            uid,
            email,
            raw: user,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaim, IdentityError> {
        let url = format!("{}/accounts:lookup", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("Identity lookup rejected token: status={}", status);
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::Malformed("no user for token".to_string()))?;

        Self::claim_from_user(user)
    }
}
