//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the mentor gateway: the
//! authenticated `POST /mentor` route plus unauthenticated health and info
//! routes, all behind a permissive CORS layer.

use crate::api::error::ApiError;
use crate::core::constants::{BEARER_PREFIX, MENTOR_SYSTEM_PROMPT};
use crate::core::identity::{IdentityClaim, IdentityVerifier};
use crate::core::keys::KeySource;
use crate::core::provider::{ProviderKind, ProviderRegistry};
use crate::models::mentor::{MentorRequest, MentorResponse};
use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, Method, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{debug, error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn IdentityVerifier>,
    pub providers: ProviderRegistry,
    pub keys: Arc<dyn KeySource>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/mentor", post(mentor))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(authenticated)
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, reflected back to the caller
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Token following `Bearer ` in the `Authorization` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
}

/// Reject unauthenticated requests and attach the caller's [`IdentityClaim`]
async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_string(),
        None => {
            warn!("Rejected request without bearer token");
            return Err(ApiError::MissingToken);
        }
    };

    let claim = state.verifier.verify(&token).await.map_err(|e| {
        warn!("Identity verification failed: {}", e);
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(claim);
    Ok(next.run(request).await)
}

/// An empty body reads as `{}`, so it fails on the prompt check. Only
/// bytes that are not JSON at all are rejected here.
fn parse_mentor_request(body: &[u8]) -> Result<MentorRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MentorRequest::default());
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        debug!("Unparseable mentor request body: {}", e);
        ApiError::InvalidBody
    })?;
    Ok(MentorRequest::from_json(value))
}

/// POST /mentor - Generate a mentor reply
async fn mentor(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaim>,
    body: Bytes,
) -> Result<Json<MentorResponse>, ApiError> {
    let request = parse_mentor_request(&body)?;

    let prompt = request.prompt_text().ok_or(ApiError::MissingPrompt)?;

    let kind = match &request.provider {
        Value::Null => ProviderKind::default(),
        Value::String(name) => ProviderKind::parse(name).ok_or(ApiError::UnknownProvider)?,
        _ => return Err(ApiError::UnknownProvider),
    };

    let request_id = uuid::Uuid::new_v4();

    let api_key = state.keys.api_key(kind).ok_or_else(|| {
        error!(%request_id, "No API key configured for provider {}", kind);
        ApiError::ProviderNotConfigured(kind)
    })?;

    let provider = state.providers.get(kind);

    info!(
        %request_id,
        uid = %identity.uid,
        "📥 Mentor request: provider={}, prompt_chars={}",
        provider.provider_name(),
        prompt.chars().count()
    );

    let text = provider
        .generate(MENTOR_SYSTEM_PROMPT, &prompt, &api_key)
        .await
        .map_err(|e| {
            error!(%request_id, "{} request failed: {}", provider.provider_name(), e);
            ApiError::Server
        })?;

    debug!(%request_id, "Mentor reply: chars={}", text.chars().count());

    Ok(Json(MentorResponse { response: text }))
}

/// GET / - Service description
async fn root() -> impl IntoResponse {
    Json(json!({
        "message": format!("Mentor Gateway v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "endpoints": {
            "mentor": "/mentor",
            "health": "/health",
        },
    }))
}

/// GET /health - Health check endpoint
async fn health_check() -> impl IntoResponse {
    let providers: Vec<&str> = ProviderKind::ALL.iter().map(ProviderKind::as_str).collect();
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "providers": providers,
    }))
}
