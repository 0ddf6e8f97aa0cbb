//! Liveness and readiness probes

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Liveness probe, never touches storage
pub async fn ping() -> &'static str {
    "pong"
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
}

/// Readiness probe: 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.store.backend();

    let records = match state.store.ping().await {
        Ok(()) => state.store.count().await,
        Err(e) => Err(e),
    };

    match records {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                storage,
                records: Some(count),
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    storage,
                    records: None,
                }),
            )
        }
    }
}
