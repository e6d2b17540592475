//! Passthrough endpoints: host info, probes, API docs, metrics.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::services::{get_metrics, DocsError};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct OsInfo {
    pub os: String,
    pub env: String,
}

pub async fn os_info(State(state): State<AppState>) -> Json<OsInfo> {
    let os = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read hostname");
            "unknown".to_string()
        });

    Json(OsInfo {
        os,
        env: state.environment.clone(),
    })
}

/// Liveness probe. Does not touch the store.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "live" })))
}

/// Readiness probe. Does not touch the store.
pub async fn readiness() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

pub async fn api_docs(State(state): State<AppState>) -> Result<Json<Value>, DocsError> {
    state.docs.load().await.map(Json)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
