//! Request id, bearer auth, and per-caller rate limiting.
//!
//! Layer order matters: `request_id` runs first so rejections carry the id,
//! and auth runs before the limiter so each caller is charged against its own
//! window.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::{ApiError, ErrorCode};

const API_KEYS_VAR: &str = "REELPULSE_API_KEYS";
const ANONYMOUS: &str = "anonymous";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Who is making a script request: the bearer token that passed auth, or
/// `anonymous` when auth is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller(String);

/// Accepted bearer tokens for the script routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    api_keys: Arc<HashSet<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Reads `REELPULSE_API_KEYS` (comma-separated bearer tokens).
    ///
    /// # Errors
    ///
    /// Fails outside development when no key is configured.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var(API_KEYS_VAR).unwrap_or_default();
        Self::from_keys(&raw, is_development)
    }

    /// Parses a comma-separated key list. An empty list disables auth in
    /// development and is an error anywhere else.
    ///
    /// # Errors
    ///
    /// Fails outside development when `raw` holds no keys.
    pub fn from_keys(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let api_keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        match (api_keys.is_empty(), is_development) {
            (false, _) => Ok(Self {
                api_keys: Arc::new(api_keys),
                enabled: true,
            }),
            (true, true) => {
                tracing::warn!("{API_KEYS_VAR} is empty; script routes accept anonymous callers");
                Ok(Self::disabled())
            }
            (true, false) => anyhow::bail!(
                "{API_KEYS_VAR} must list at least one bearer token outside development"
            ),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_keys: Arc::new(HashSet::new()),
            enabled: false,
        }
    }

    fn caller_for(&self, token: Option<&str>) -> Option<Caller> {
        if !self.enabled {
            return Some(Caller(ANONYMOUS.to_owned()));
        }
        token
            .filter(|t| self.api_keys.contains(*t))
            .map(|t| Caller(t.to_owned()))
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: usize,
}

/// Fixed-window request budget, tracked separately for each caller.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    windows: Arc<Mutex<HashMap<Caller, Window>>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Charge one request to `caller`. On refusal returns how long until the
    /// caller's window resets.
    async fn charge(&self, caller: &Caller, now: Instant) -> Result<(), Duration> {
        let mut windows = self.windows.lock().await;
        let window = windows.entry(caller.clone()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started_at);
        if elapsed >= self.window {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            return Err(self
                .window
                .saturating_sub(now.saturating_duration_since(window.started_at)));
        }
        window.count += 1;
        Ok(())
    }
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map_or_else(String::new, |id| id.0.clone())
}

/// Uses the incoming `x-request-id` header when present, otherwise a fresh
/// `UUIDv4`. The id is stored as a [`RequestId`] extension and echoed on the
/// response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Resolves the [`Caller`] for the request or answers 401.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = extract_bearer_token(req.headers().get(header::AUTHORIZATION));
    let Some(caller) = auth.caller_for(token) else {
        return ApiError::new(
            request_id_of(&req),
            ErrorCode::Unauthorized,
            "missing or invalid bearer token",
        )
        .into_response();
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}

/// Answers 429 with `Retry-After` once the caller's window is spent.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let caller = req
        .extensions()
        .get::<Caller>()
        .cloned()
        .unwrap_or_else(|| Caller(ANONYMOUS.to_owned()));

    if let Err(retry_after) = rate_limit.charge(&caller, Instant::now()).await {
        tracing::warn!(
            retry_after_secs = retry_after.as_secs(),
            "script route rate limit exceeded"
        );
        let mut res = ApiError::new(
            request_id_of(&req),
            ErrorCode::RateLimited,
            "rate limit exceeded",
        )
        .into_response();
        // Whole seconds, rounded up.
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        res.headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        return res;
    }

    next.run(req).await
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
