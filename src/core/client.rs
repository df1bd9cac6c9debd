//! Shared outbound HTTP client
//!
//! One `reqwest::Client` is built at startup and cloned into the identity
//! verifier and both provider adapters, so they share a connection pool.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Build the outbound client
///
/// A `timeout_secs` of zero leaves the transport default (no overall timeout).
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let mut builder = Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().context("Failed to create HTTP client")
}
