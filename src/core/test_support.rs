//! Helpers for tests that need a live upstream

use crate::core::keys::KeySource;
use crate::core::provider::ProviderKind;
use axum::Router;
use std::collections::HashMap;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fixed set of provider keys
#[derive(Debug, Clone, Default)]
pub struct StaticKeySource {
    keys: HashMap<ProviderKind, String>,
}

impl StaticKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, kind: ProviderKind, key: impl Into<String>) -> Self {
        self.keys.insert(kind, key.into());
        self
    }
}

impl KeySource for StaticKeySource {
    fn api_key(&self, kind: ProviderKind) -> Option<String> {
        self.keys.get(&kind).cloned()
    }
}
