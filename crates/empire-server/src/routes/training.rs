//! Imprint and Training Routes
//!
//! Both respond once their primary write succeeds. The XP grant that
//! follows runs detached and its failure is only logged.

use axum::{extract::State, routing::post, Json, Router};

use empire::domain::tables::{IMPRINT_XP, TRAINING_XP};

use super::error::{ApiError, ErrorResponse};
use crate::models::{ImprintRequest, ImprintResponse, TrainResponse, TwinIdRequest};
use crate::AppState;

/// Imprint a memory on a twin
#[utoipa::path(
    post,
    path = "/imprint-memory",
    request_body = ImprintRequest,
    responses(
        (status = 200, description = "Memory stored", body = ImprintResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Training"
)]
pub async fn imprint_memory(
    State(state): State<AppState>,
    Json(payload): Json<ImprintRequest>,
) -> Result<Json<ImprintResponse>, ApiError> {
    let (memory, grant) = state
        .training_service
        .imprint(payload.twin_id, payload.content)
        .await?;
    grant.detach();

    Ok(Json(ImprintResponse {
        success: true,
        memory: memory.into(),
        xp_pending: IMPRINT_XP,
    }))
}

/// Retrain a twin's personality from its recent memories
#[utoipa::path(
    post,
    path = "/train-twin",
    request_body = TwinIdRequest,
    responses(
        (status = 200, description = "Personality regenerated", body = TrainResponse),
        (status = 402, description = "Text generation credits exhausted", body = ErrorResponse),
        (status = 429, description = "Text generation rate limited", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Training"
)]
pub async fn train_twin(
    State(state): State<AppState>,
    Json(payload): Json<TwinIdRequest>,
) -> Result<Json<TrainResponse>, ApiError> {
    let (twin, grant) = state.training_service.train(payload.twin_id).await?;
    grant.detach();

    Ok(Json(TrainResponse {
        success: true,
        twin: twin.into(),
        xp_pending: TRAINING_XP,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/imprint-memory", post(imprint_memory))
        .route("/train-twin", post(train_twin))
}
