//! Memory Shard Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::{ApiError, ErrorResponse};
use crate::models::{EvolveShardsRequest, EvolveShardsResponse, ShardResponse};
use crate::AppState;

/// Evolve every shard of a twin
///
/// Each shard gains the same context-dependent XP and may be promoted.
/// A new common shard may spawn.
#[utoipa::path(
    post,
    path = "/evolve-memory-shards",
    request_body = EvolveShardsRequest,
    responses(
        (status = 200, description = "Shards evolved", body = EvolveShardsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Shards"
)]
pub async fn evolve_memory_shards(
    State(state): State<AppState>,
    Json(payload): Json<EvolveShardsRequest>,
) -> Result<Json<EvolveShardsResponse>, ApiError> {
    let evolution = state
        .shard_service
        .evolve(payload.twin_id, &payload.context)
        .await?;
    Ok(Json(evolution.into()))
}

#[utoipa::path(
    get,
    path = "/twins/{id}/shards",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Shards of the twin", body = Vec<ShardResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Shards"
)]
pub async fn list_shards(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ShardResponse>>, ApiError> {
    let shards = state.shard_service.list(id).await?;
    Ok(Json(shards.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evolve-memory-shards", post(evolve_memory_shards))
        .route("/twins/:id/shards", get(list_shards))
}
