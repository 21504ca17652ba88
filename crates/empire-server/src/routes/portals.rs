//! Portal Routes

use axum::{extract::State, routing::post, Json, Router};

use super::error::{ApiError, ErrorResponse};
use crate::models::{UnlockPortalRequest, UnlockPortalResponse};
use crate::AppState;

/// Try to unlock a portal for a user
///
/// An unmet requirement is reported as `success: false` with a reason,
/// not as an error.
#[utoipa::path(
    post,
    path = "/unlock-portal",
    request_body = UnlockPortalRequest,
    responses(
        (status = 200, description = "Unlocked, or denied with a reason", body = UnlockPortalResponse),
        (status = 500, description = "Unknown portal, no twin for user, or internal error", body = ErrorResponse)
    ),
    tag = "Portals"
)]
pub async fn unlock_portal(
    State(state): State<AppState>,
    Json(payload): Json<UnlockPortalRequest>,
) -> Result<Json<UnlockPortalResponse>, ApiError> {
    let decision = state
        .portal_service
        .unlock(payload.user_id, &payload.portal)
        .await?;
    Ok(Json(decision.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/unlock-portal", post(unlock_portal))
}
