use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument};

use health_monitor_data::models::{SleepData, SleepStageDocument, SleepTimeEntry};
use health_monitor_domain::entities::SleepMetrics;

use crate::api::state::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::query::SeriesQuery;

/// Get the stored sleep stage document
#[utoipa::path(
    get,
    path = "/api/v1/sleep-stages/raw-data",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Stored document", body = SleepStageDocument),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn get_raw_data(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SleepStageDocument>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    Ok(Json(state.sleep.get_document(&key).await?))
}

/// Get the scored epochs with their times
#[utoipa::path(
    get,
    path = "/api/v1/sleep-stages/timeseries",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Epochs in stored order", body = [SleepTimeEntry]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn get_timeseries(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<SleepTimeEntry>>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let document = state.sleep.get_document(&key).await?;
    Ok(Json(document.timeseries))
}

/// Get the scored stages without their times
#[utoipa::path(
    get,
    path = "/api/v1/sleep-stages",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Stages in stored order", body = [SleepData]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn get_stages(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<SleepData>>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let document = state.sleep.get_document(&key).await?;
    Ok(Json(document.timeseries.into_iter().map(|entry| entry.data).collect()))
}

/// Summarize the night
#[utoipa::path(
    get,
    path = "/api/v1/sleep-stages/metrics",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Night summary", body = SleepMetrics),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document or no epochs", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn get_metrics(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SleepMetrics>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let metrics = state.sleep.get_metrics(&key).await?;
    info!(
        "Sleep metrics for {}/{}: {} minutes over {} epochs",
        key.user(),
        key.date(),
        metrics.total_sleep_minutes,
        metrics.epoch_count
    );
    Ok(Json(metrics))
}
