//! Mentor Gateway
//!
//! A single authenticated endpoint that forwards a prompt to OpenAI or
//! Anthropic under a fixed mentor instruction and returns the generated text.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::client::build_http_client;
use crate::core::config::Config;
use crate::core::identity::{FirebaseVerifier, IdentityVerifier};
use crate::core::keys::{EnvKeySource, KeySource};
use crate::core::logging::init_logging;
use crate::core::provider::{ProviderKind, ProviderRegistry};
use crate::core::providers::{AnthropicProvider, OpenAIProvider};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // A missing .env file is normal outside local development
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    print_startup_banner(&config);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let Some(identity_api_key) = config.identity_api_key() else {
        error!(
            "Identity service key missing: set {}",
            config.identity.api_key_env
        );
        std::process::exit(1);
    };

    let client = match build_http_client(config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let verifier: Arc<dyn IdentityVerifier> = Arc::new(FirebaseVerifier::new(
        client.clone(),
        config.identity.base_url.clone(),
        identity_api_key,
    ));

    let providers = ProviderRegistry::new(
        Arc::new(OpenAIProvider::new(
            client.clone(),
            config.openai.base_url.clone(),
            config.openai.model.clone(),
        )),
        Arc::new(AnthropicProvider::new(
            client,
            config.anthropic.base_url.clone(),
            config.anthropic.model.clone(),
        )),
    );

    let keys: Arc<dyn KeySource> = Arc::new(EnvKeySource::from_config(&config));
    for kind in ProviderKind::ALL {
        if keys.api_key(kind).is_none() {
            warn!("No API key set for {} yet; its requests will fail until one is", kind);
        }
    }

    let app = create_router(AppState {
        verifier,
        providers,
        keys,
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Mentor Gateway v{}", env!("CARGO_PKG_VERSION"));
    println!("✅ Configuration loaded successfully");
    println!(
        "   OpenAI: {} ({}, key from ${})",
        config.openai.base_url, config.openai.model, config.openai.api_key_env
    );
    println!(
        "   Anthropic: {} ({}, key from ${})",
        config.anthropic.base_url, config.anthropic.model, config.anthropic.api_key_env
    );
    println!("   Identity: {}", config.identity.base_url);
    if config.request_timeout > 0 {
        println!("   Request Timeout: {}s", config.request_timeout);
    } else {
        println!("   Request Timeout: none");
    }
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Mentor Gateway v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: mentor-gateway [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Configuration file:");
    println!("  CONFIG_PATH - TOML file to load (default: ./config.toml if present)");
    println!();
    println!("Environment variables (names configurable in the TOML file):");
    println!("  FIREBASE_API_KEY  - Identity Toolkit key used to verify ID tokens (required)");
    println!("  OPENAI_API_KEY    - OpenAI key, read on every request");
    println!("  ANTHROPIC_API_KEY - Anthropic key, read on every request");
    println!("  RUST_LOG          - Overrides server.log_level");
    println!();
    println!("Endpoints:");
    println!("  POST /mentor  - {{\"prompt\": string, \"provider\"?: \"openai\" | \"anthropic\"}}");
    println!("  GET  /health  - Health check");
}
