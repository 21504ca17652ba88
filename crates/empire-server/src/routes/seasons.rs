//! Seasonal Event Routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::error::{ApiError, ErrorResponse};
use crate::models::{SeasonResponse, SeasonRotationResponse};
use crate::AppState;

/// Rotate the seasonal event if the active one has ended
///
/// Intended for an external periodic trigger. A running season makes this a
/// no-op that reports the current event.
#[utoipa::path(
    post,
    path = "/seasonal-event-rotation",
    responses(
        (status = 200, description = "Rotation result", body = SeasonRotationResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Seasons"
)]
pub async fn rotate_season(
    State(state): State<AppState>,
) -> Result<Json<SeasonRotationResponse>, ApiError> {
    let rotation = state.season_service.rotate().await?;
    Ok(Json(rotation.into()))
}

/// Currently active seasonal event (null if none)
#[utoipa::path(
    get,
    path = "/seasonal-event",
    responses(
        (status = 200, description = "Active event, or null when none", body = SeasonResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Seasons"
)]
pub async fn current_season(
    State(state): State<AppState>,
) -> Result<Json<Option<SeasonResponse>>, ApiError> {
    let event = state.season_service.current().await?;
    Ok(Json(event.map(Into::into)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seasonal-event-rotation", post(rotate_season))
        .route("/seasonal-event", get(current_season))
}
