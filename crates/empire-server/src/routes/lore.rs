//! Lore Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::{ApiError, ErrorResponse};
use crate::models::{GenerateLoreRequest, LoreResponse};
use crate::AppState;

/// Generate a lore fragment for a level
#[utoipa::path(
    post,
    path = "/generate-lore",
    request_body = GenerateLoreRequest,
    responses(
        (status = 200, description = "Lore entry stored", body = LoreResponse),
        (status = 402, description = "Text generation credits exhausted", body = ErrorResponse),
        (status = 429, description = "Text generation rate limited", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Lore"
)]
pub async fn generate_lore(
    State(state): State<AppState>,
    Json(payload): Json<GenerateLoreRequest>,
) -> Result<Json<LoreResponse>, ApiError> {
    let entry = state
        .lore_service
        .generate(payload.twin_id, payload.level)
        .await?;
    Ok(Json(entry.into()))
}

#[utoipa::path(
    get,
    path = "/twins/{id}/lore",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Lore entries, newest first", body = Vec<LoreResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Lore"
)]
pub async fn list_lore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LoreResponse>>, ApiError> {
    let entries = state.lore_service.list(id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-lore", post(generate_lore))
        .route("/twins/:id/lore", get(list_lore))
}
