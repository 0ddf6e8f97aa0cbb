//! Running statistic handlers

use super::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use runlog_core::{NewRunningStatistic, RunningStatistic, StatisticId, StatisticsResponse};
use tracing::info;

fn parse_id(raw: &str) -> Result<StatisticId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid ID".to_string()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<StatisticsResponse>, ApiError> {
    // The store hands back an owned snapshot, encoding happens after its lock is released
    let statistics = state.store.list().await?;
    Ok(Json(StatisticsResponse::from(statistics)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewRunningStatistic>, JsonRejection>,
) -> Result<(StatusCode, Json<RunningStatistic>), ApiError> {
    let Json(new) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let record = state.store.create(new).await?;
    info!(
        "Created running statistic {}: date={}, distance={}, time={}",
        record.id, record.date, record.distance, record.time
    );

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RunningStatistic>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.get(id).await?;
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    info!("Deleted running statistic {}", id);
    Ok(StatusCode::NO_CONTENT)
}
