use axum::{
    extract::{Query, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    config::Config,
    lottie::{
        client::{LottieClient, LottieError},
        normalize::normalize_payload,
        types::{AnimationRequest, ErrorResponse},
        AnimationCache, CachedAnimations,
    },
};

const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data from LottieFiles API.";
const X_CACHE: &str = "x-cache";

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lottie_client: Arc<LottieClient>,
    pub cache: AnimationCache,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub cached_entries: u64,
    pub cache_ttl_secs: u64,
}

// Route handlers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    state.cache.run_pending_tasks().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_entries: state.cache.entry_count(),
        cache_ttl_secs: state.config.cache_ttl_secs,
    })
}

/// CORS preflight; the headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn lottie_proxy(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = AnimationRequest::from_pairs(&params);
    let cache_key = state.lottie_client.cache_key(&request);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {} (cached at {})", cache_key, cached.cached_at);
        return (StatusCode::OK, [(X_CACHE, "HIT")], Json(cached.data)).into_response();
    }

    tracing::debug!("Cache miss for {}", cache_key);
    let payload = match state.lottie_client.fetch(&request).await {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };

    let body = match serde_json::to_value(normalize_payload(&request, payload)) {
        Ok(body) => body,
        Err(e) => return LottieError::from(e).into_response(),
    };

    state
        .cache
        .insert(
            cache_key,
            CachedAnimations {
                data: body.clone(),
                cached_at: chrono::Utc::now(),
            },
        )
        .await;

    (StatusCode::OK, [(X_CACHE, "MISS")], Json(body)).into_response()
}

impl IntoResponse for LottieError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            LottieError::UpstreamStatus { status, body } => {
                tracing::error!("LottieFiles API responded with status {}: {}", status, body);
                // Only 4xx/5xx pass through verbatim.
                let code = StatusCode::from_u16(status)
                    .ok()
                    .filter(|code| code.is_client_error() || code.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                error_response(code, message)
            }
            other => {
                tracing::error!("Error fetching from LottieFiles API: {}", other);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE.to_string())
            }
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lottie", get(lottie_proxy).options(preflight))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"))
        .layer(cors_header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}
