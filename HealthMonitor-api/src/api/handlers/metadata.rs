use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use health_monitor_data::models::Metadata;

use crate::api::state::AppState;
use crate::entities::common::{ErrorResponse, MessageResponse};
use crate::entities::query::MetadataQuery;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name", body = MessageResponse),
    ),
    tag = "health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Health Monitoring API".to_string(),
    })
}

/// Get the metadata header of a stored document
#[utoipa::path(
    get,
    path = "/api/v1/metadata",
    params(MetadataQuery),
    responses(
        (status = 200, description = "Document metadata", body = Metadata),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "No document for the user and date", body = ErrorResponse),
        (status = 422, description = "Stored document is malformed", body = ErrorResponse),
    ),
    tag = "metadata"
)]
#[instrument(skip(state))]
pub async fn get_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Result<Json<Metadata>, ErrorResponse> {
    let key = query.series().resolve(&state.default_user, &state.default_date)?;
    let domain = query.health_domain()?;
    Ok(Json(state.metadata.get_metadata(&key, domain).await?))
}
