mod scripts;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use reelpulse_core::AppConfig;
use reelpulse_scriptgen::{OpenAiClient, ScriptGenError, ScriptGenerationService};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

pub type ScriptService = ScriptGenerationService<OpenAiClient>;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no OpenAI key is configured; script routes then answer 503.
    pub scripts: Option<Arc<ScriptService>>,
}

impl AppState {
    /// Build the completion client once at startup.
    ///
    /// A missing key is not fatal here; it surfaces on the first script request.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match OpenAiClient::from_settings(&config.openai) {
            Ok(client) => {
                tracing::info!(model = client.model(), "script generation enabled");
                Ok(Self {
                    scripts: Some(Arc::new(ScriptGenerationService::new(client))),
                })
            }
            Err(ScriptGenError::MissingApiKey) => {
                tracing::warn!("OPENAI_API_KEY not set; script routes will return 503");
                Ok(Self { scripts: None })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Success envelope: `{ data, meta }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Failure envelope: `{ error: { code, message }, meta }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Machine-readable error code; each maps to exactly one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ValidationError,
    Unauthorized,
    NotFound,
    RateLimited,
    InternalError,
    UpstreamError,
    /// No completion API key is configured.
    ConfigurationError,
}

impl ErrorCode {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorCode::ConfigurationError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    script_generation: &'static str,
}

impl ResponseMeta {
    fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, request_id: impl Into<String>) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(request_id: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.error.code.status(), Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/scripts", post(scripts::generate_script))
        .route("/api/v1/scripts/voiceover", post(scripts::generate_voiceover))
        .route(
            "/api/v1/scripts/image-prompts",
            post(scripts::generate_image_prompts),
        )
        .route(
            "/api/v1/scripts/scenes/{scene_id}/regenerate",
            post(scripts::regenerate_scene),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let script_generation = if state.scripts.is_some() {
        "configured"
    } else {
        "unconfigured"
    };

    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            script_generation,
        },
        req_id.0,
    ))
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(30, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
