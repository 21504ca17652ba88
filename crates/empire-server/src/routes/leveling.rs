//! Leveling Routes
//!
//! The two endpoints run different leveling policies and are not
//! interchangeable.

use axum::{extract::State, routing::post, Json, Router};

use super::error::{ApiError, ErrorResponse};
use crate::models::{GrantXpRequest, LevelUpResponse};
use crate::AppState;

/// Grant XP directly on the twin
///
/// Unlocks one trait per level gained and rewrites the personality on
/// level-up. A failed rewrite is logged and skipped.
#[utoipa::path(
    post,
    path = "/evolve-twin",
    request_body = GrantXpRequest,
    responses(
        (status = 200, description = "XP applied", body = LevelUpResponse),
        (status = 500, description = "Twin not found or internal error", body = ErrorResponse)
    ),
    tag = "Leveling"
)]
pub async fn evolve_twin(
    State(state): State<AppState>,
    Json(payload): Json<GrantXpRequest>,
) -> Result<Json<LevelUpResponse>, ApiError> {
    let outcome = state
        .evolve_twin
        .grant_xp(payload.twin_id, payload.xp_gain, &payload.source)
        .await?;
    Ok(Json(outcome.into()))
}

/// Grant XP through the stats record
///
/// Raises one random attribute per level gained, mirrors level and xp onto
/// the twin, and spawns a shard on level-up.
#[utoipa::path(
    post,
    path = "/twin-level-up",
    request_body = GrantXpRequest,
    responses(
        (status = 200, description = "XP applied", body = LevelUpResponse),
        (status = 500, description = "Twin not found or internal error", body = ErrorResponse)
    ),
    tag = "Leveling"
)]
pub async fn twin_level_up(
    State(state): State<AppState>,
    Json(payload): Json<GrantXpRequest>,
) -> Result<Json<LevelUpResponse>, ApiError> {
    let outcome = state
        .twin_level_up
        .grant_xp(payload.twin_id, payload.xp_gain, &payload.source)
        .await?;
    Ok(Json(outcome.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evolve-twin", post(evolve_twin))
        .route("/twin-level-up", post(twin_level_up))
}
