//! Quest Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::{ApiError, ErrorResponse};
use crate::models::{
    AssignQuestsResponse, CompleteQuestRequest, CompleteQuestResponse, QuestResponse,
    TwinIdRequest,
};
use crate::AppState;

/// Assign today's quests
///
/// Inserts 2-3 quests expiring in one day unless the twin still has
/// unexpired ones, in which case those are returned unchanged.
#[utoipa::path(
    post,
    path = "/assign-daily-quests",
    request_body = TwinIdRequest,
    responses(
        (status = 200, description = "Quests assigned or already present", body = AssignQuestsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Quests"
)]
pub async fn assign_daily_quests(
    State(state): State<AppState>,
    Json(payload): Json<TwinIdRequest>,
) -> Result<Json<AssignQuestsResponse>, ApiError> {
    let assignment = state.quest_service.assign_daily(payload.twin_id).await?;
    Ok(Json(assignment.into()))
}

/// Complete a quest
///
/// The quest's XP reward is granted in the background.
#[utoipa::path(
    post,
    path = "/complete-quest",
    request_body = CompleteQuestRequest,
    responses(
        (status = 200, description = "Quest completed", body = CompleteQuestResponse),
        (status = 500, description = "Quest missing, expired or already completed", body = ErrorResponse)
    ),
    tag = "Quests"
)]
pub async fn complete_quest(
    State(state): State<AppState>,
    Json(payload): Json<CompleteQuestRequest>,
) -> Result<Json<CompleteQuestResponse>, ApiError> {
    let (quest, grant) = state.quest_service.complete(payload.quest_id).await?;
    grant.detach();

    Ok(Json(CompleteQuestResponse {
        success: true,
        xp_pending: quest.xp_reward,
        quest: quest.into(),
    }))
}

/// List a twin's unexpired quests
#[utoipa::path(
    get,
    path = "/twins/{id}/quests",
    params(("id" = Uuid, Path, description = "Twin ID")),
    responses(
        (status = 200, description = "Unexpired quests", body = Vec<QuestResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Quests"
)]
pub async fn list_quests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuestResponse>>, ApiError> {
    let quests = state.quest_service.list_active(id).await?;
    Ok(Json(quests.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assign-daily-quests", post(assign_daily_quests))
        .route("/complete-quest", post(complete_quest))
        .route("/twins/:id/quests", get(list_quests))
}
