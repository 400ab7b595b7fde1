use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument};

use health_monitor_data::models::{BloodPressureData, BloodPressureDocument, BloodPressureTimeEntry};
use health_monitor_domain::entities::{conversions, PlotSeries};

use crate::api::state::AppState;
use crate::chart::render_blood_pressure_chart;
use crate::entities::blood_pressure::ClassificationResponse;
use crate::entities::common::ErrorResponse;
use crate::entities::query::{NotificationQuery, SeriesQuery};

/// Get the stored blood pressure document
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/raw-data",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Stored document", body = BloodPressureDocument),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_raw_data(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<BloodPressureDocument>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let document = state.blood_pressure.get_document(&key).await?;
    Ok(Json(document))
}

/// Get the blood pressure time entries
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/timeseries",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Time entries in stored order", body = [BloodPressureTimeEntry]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_timeseries(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<BloodPressureTimeEntry>>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let document = state.blood_pressure.get_document(&key).await?;
    Ok(Json(document.timeseries))
}

/// Get the readings without their times
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Readings in stored order", body = [BloodPressureData]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_readings(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<BloodPressureData>>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let observations = state.blood_pressure.get_observations(&key).await?;
    Ok(Json(
        observations.iter().map(conversions::convert_to_data_reading).collect(),
    ))
}

/// Classify every reading of the day
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/classifications",
    params(SeriesQuery),
    responses(
        (status = 200, description = "One category per reading", body = [ClassificationResponse]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "A reading is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_classifications(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<ClassificationResponse>>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let classified = state.blood_pressure.classify_series(&key).await?;
    info!("Classified {} readings for {}/{}", classified.len(), key.user(), key.date());
    Ok(Json(classified.into_iter().map(ClassificationResponse::from).collect()))
}

/// Summarize the day as a single notification label
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/notification",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Label of the summary category", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document or no readings", body = ErrorResponse),
        (status = 422, description = "A reading is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_notification(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<String, ErrorResponse> {
    let key = query.series().resolve(&state.default_user, &state.default_date)?;
    let policy = query.summary_policy()?;
    let category = state.blood_pressure.summarize(&key, policy).await?;
    Ok(category.label().to_string())
}

/// Get the series flattened for charting
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/plot-data",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Chart columns", body = PlotSeries),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_plot_data(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<PlotSeries>, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    Ok(Json(state.blood_pressure.get_plot_series(&key).await?))
}

/// Render the day as a PNG line chart
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/plot",
    params(SeriesQuery),
    responses(
        (status = 200, description = "PNG chart", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
        (status = 500, description = "Chart could not be rendered", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn get_plot(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Response, ErrorResponse> {
    let key = query.resolve(&state.default_user, &state.default_date)?;
    let series = state.blood_pressure.get_plot_series(&key).await?;

    // Encoding a 1500x700 image is CPU bound
    let png = tokio::task::spawn_blocking(move || render_blood_pressure_chart(&series))
        .await
        .map_err(|e| {
            error!("Chart task failed: {}", e);
            ErrorResponse::internal_error()
        })?
        .map_err(|e| {
            error!("{}", e);
            ErrorResponse::internal_error()
        })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
