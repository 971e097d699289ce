mod scrape;

use std::env::VarError;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{guard_trigger, request_id, TriggerGuard};

/// Environment lookup consulted on every pipeline run.
pub type EnvLookup = Arc<dyn Fn(&str) -> Result<String, VarError> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub lookup: EnvLookup,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
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

/// `{"error": message}` with `status`, the body every failure on these routes uses.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(scrape::ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn trigger_router(guard: TriggerGuard) -> Router<AppState> {
    Router::new()
        .route("/api/scrape", get(scrape::trigger).post(scrape::trigger))
        .layer(axum::middleware::from_fn_with_state(guard, guard_trigger))
}

pub fn build_app(state: AppState, guard: TriggerGuard) -> Router {
    let public_routes = Router::new().route("/api/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(trigger_router(guard))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}
