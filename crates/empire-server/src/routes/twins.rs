//! Twin Registry Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::{ApiError, ErrorResponse};
use crate::models::{CreateTwinRequest, TwinResponse, TwinStatsResponse, VisibilityRequest};
use crate::AppState;

/// Create a twin for a user
#[utoipa::path(
    post,
    path = "/twins",
    request_body = CreateTwinRequest,
    responses(
        (status = 200, description = "Twin created", body = TwinResponse),
        (status = 500, description = "Invalid alignment/tone, duplicate twin, or internal error", body = ErrorResponse)
    ),
    tag = "Twins"
)]
pub async fn create_twin(
    State(state): State<AppState>,
    Json(payload): Json<CreateTwinRequest>,
) -> Result<Json<TwinResponse>, ApiError> {
    let twin = state
        .twin_service
        .create(
            payload.user_id,
            payload.username,
            &payload.alignment,
            &payload.tone,
            payload.personality,
        )
        .await?;
    Ok(Json(twin.into()))
}

#[utoipa::path(
    get,
    path = "/twins/{id}",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Twin found", body = TwinResponse),
        (status = 500, description = "Twin not found or internal error", body = ErrorResponse)
    ),
    tag = "Twins"
)]
pub async fn get_twin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TwinResponse>, ApiError> {
    let twin = state.twin_service.get(id).await?;
    Ok(Json(twin.into()))
}

#[utoipa::path(
    get,
    path = "/twins/{id}/stats",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Stats record (defaults if never granted)", body = TwinStatsResponse),
        (status = 500, description = "Twin not found or internal error", body = ErrorResponse)
    ),
    tag = "Twins"
)]
pub async fn get_twin_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TwinStatsResponse>, ApiError> {
    let stats = state.twin_service.stats(id).await?;
    Ok(Json(stats.into()))
}

/// Change who can see a twin
#[utoipa::path(
    post,
    path = "/twin-visibility",
    request_body = VisibilityRequest,
    responses(
        (status = 200, description = "Visibility updated", body = TwinResponse),
        (status = 500, description = "Unknown visibility value, twin not found, or internal error", body = ErrorResponse)
    ),
    tag = "Twins"
)]
pub async fn set_visibility(
    State(state): State<AppState>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<Json<TwinResponse>, ApiError> {
    let twin = state
        .twin_service
        .set_visibility(payload.twin_id, &payload.visibility)
        .await?;
    Ok(Json(twin.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/twins", post(create_twin))
        .route("/twins/:id", get(get_twin))
        .route("/twins/:id/stats", get(get_twin_stats))
        .route("/twin-visibility", post(set_visibility))
}
