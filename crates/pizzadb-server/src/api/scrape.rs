//! `GET|POST /api/scrape`: run the pipeline once and report the vendor count.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Serialize;

use super::AppState;
use crate::middleware::RequestId;

pub const SUCCESS_MESSAGE: &str = "Данные обновлены!";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TriggerResponse {
    pub success: bool,
    pub message: &'static str,
    pub updated: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

pub(super) async fn trigger(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> axum::response::Response {
    tracing::info!(request_id = %req_id.0, "pipeline run triggered over HTTP");

    match pizzadb_pipeline::run_from_lookup(state.lookup.as_ref()).await {
        Ok(summary) => {
            for diagnostic in &summary.diagnostics {
                tracing::debug!(
                    request_id = %req_id.0,
                    stage = %diagnostic.stage,
                    message = %diagnostic.message,
                    "recovered failure during run"
                );
            }
            (
                StatusCode::OK,
                Json(TriggerResponse {
                    success: true,
                    message: SUCCESS_MESSAGE,
                    updated: summary.updated,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "pipeline run failed");
            super::error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
