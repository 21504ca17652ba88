//! Twin Relation Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::{ApiError, ErrorResponse};
use crate::models::{
    ComputeRelationResponse, RelationRequest, RelationResponse, RelationScoreBreakdown,
};
use crate::AppState;

/// Score and store the relation from one twin to another
#[utoipa::path(
    post,
    path = "/twin-relations",
    request_body = RelationRequest,
    responses(
        (status = 200, description = "Relation computed", body = ComputeRelationResponse),
        (status = 500, description = "Either twin missing or internal error", body = ErrorResponse)
    ),
    tag = "Relations"
)]
pub async fn compute_relation(
    State(state): State<AppState>,
    Json(payload): Json<RelationRequest>,
) -> Result<Json<ComputeRelationResponse>, ApiError> {
    let (relation, score) = state
        .relation_service
        .compute(payload.twin_id, payload.target_twin_id)
        .await?;

    Ok(Json(ComputeRelationResponse {
        score: RelationScoreBreakdown::from(&score),
        relation: relation.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/twins/{id}/relations",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Outgoing relations", body = Vec<RelationResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Relations"
)]
pub async fn list_relations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RelationResponse>>, ApiError> {
    let relations = state.relation_service.list(id).await?;
    Ok(Json(relations.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/twin-relations", post(compute_relation))
        .route("/twins/:id/relations", get(list_relations))
}
