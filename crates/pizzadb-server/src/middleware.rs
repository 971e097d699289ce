//! Request ids, and the guard in front of the pipeline trigger.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use pizzadb_core::{AppConfig, Environment};
use subtle::ConstantTimeEq;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error_response;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id for the current request, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Decides who may start a pipeline run and how often.
///
/// Runs are counted over a sliding window, so a burst at the end of one
/// minute cannot be followed by another burst at the start of the next.
#[derive(Debug, Clone)]
pub struct TriggerGuard {
    tokens: Arc<[String]>,
    max_runs: usize,
    window: Duration,
    accepted: Arc<Mutex<VecDeque<Instant>>>,
}

impl TriggerGuard {
    /// Tokens from `PIZZADB_TRIGGER_TOKENS`, `PIZZADB_RATE_LIMIT_PER_MIN` runs per minute.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config.trigger_tokens.clone(),
            config.env == Environment::Development,
            config.rate_limit_per_min,
            Duration::from_secs(60),
        )
    }

    /// An empty token list leaves the trigger open, and is accepted only in
    /// development.
    pub fn new(
        tokens: Vec<String>,
        is_development: bool,
        max_runs: usize,
        window: Duration,
    ) -> anyhow::Result<Self> {
        if tokens.is_empty() {
            if !is_development {
                anyhow::bail!(
                    "PIZZADB_TRIGGER_TOKENS must list at least one token outside development"
                );
            }
            tracing::warn!("no trigger tokens configured; /api/scrape is open to any caller");
        }

        Ok(Self {
            tokens: tokens.into(),
            max_runs,
            window,
            accepted: Arc::new(Mutex::new(VecDeque::new())),
        })
    }

    fn is_open(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Compares the presented token against every known token.
    fn authorizes(&self, headers: &HeaderMap) -> bool {
        if self.is_open() {
            return true;
        }
        bearer_token(headers).is_some_and(|presented| {
            self.tokens.iter().fold(false, |matched, known| {
                matched | bool::from(known.as_bytes().ct_eq(presented.as_bytes()))
            })
        })
    }

    /// Records a run at `now` if the window has room. Otherwise returns the
    /// time until the oldest recorded run leaves the window.
    fn admit(&self, now: Instant) -> Result<(), Duration> {
        let mut accepted = self
            .accepted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while accepted
            .front()
            .is_some_and(|at| now.duration_since(*at) >= self.window)
        {
            accepted.pop_front();
        }

        if accepted.len() >= self.max_runs {
            let oldest = accepted.front().copied().unwrap_or(now);
            return Err(self.window.saturating_sub(now.duration_since(oldest)));
        }

        accepted.push_back(now);
        Ok(())
    }
}

/// Reuses a well-formed incoming `x-request-id` or mints a `UUIDv4`.
///
/// The id is stored as a [`RequestId`] extension, attached to a `request`
/// span wrapping the rest of the stack, and echoed on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| is_usable_request_id(v))
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", request_id = %id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// 401 without a valid bearer token; 429 with `Retry-After` once the run
/// budget for the window is spent. Rejected callers do not use up the budget.
pub async fn guard_trigger(
    State(guard): State<TriggerGuard>,
    req: Request,
    next: Next,
) -> Response {
    if !guard.authorizes(req.headers()) {
        return error_response(StatusCode::UNAUTHORIZED, "missing or invalid bearer token");
    }

    if let Err(wait) = guard.admit(Instant::now()) {
        let retry_after = wait.as_secs().max(1);
        tracing::warn!(retry_after, "pipeline trigger rejected by rate limit");
        let mut response = error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "too many pipeline runs; try again later",
        );
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return response;
    }

    next.run(req).await
}

/// Token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let (scheme, token) = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn is_usable_request_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= MAX_REQUEST_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic())
}
