//! World DTOs - relations, seasons and portals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use empire::domain::services::RelationScore;
use empire::{SeasonalEvent, TwinRelation};

use crate::application::{PortalDecision, SeasonRotation};

// ============================================
// Relations
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationRequest {
    pub twin_id: Uuid,
    pub target_twin_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationResponse {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub target_twin_id: Uuid,
    /// ally | rival | neutral
    pub relation_type: String,
    /// 0 - 100
    pub strength: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<TwinRelation> for RelationResponse {
    fn from(relation: TwinRelation) -> Self {
        Self {
            id: relation.id,
            twin_id: relation.twin_id,
            target_twin_id: relation.target_twin_id,
            relation_type: relation.relation_type.to_string(),
            strength: relation.strength,
            updated_at: relation.updated_at,
        }
    }
}

/// Sub-scores behind a relation
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationScoreBreakdown {
    pub alignment_score: f64,
    pub tone_score: f64,
    pub trait_score: f64,
    pub total_score: f64,
}

impl From<&RelationScore> for RelationScoreBreakdown {
    fn from(score: &RelationScore) -> Self {
        Self {
            alignment_score: score.alignment_score,
            tone_score: score.tone_score,
            trait_score: score.trait_score,
            total_score: score.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRelationResponse {
    pub relation: RelationResponse,
    pub score: RelationScoreBreakdown,
}

// ============================================
// Seasons
// ============================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    pub id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub effects: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SeasonalEvent> for SeasonResponse {
    fn from(event: SeasonalEvent) -> Self {
        Self {
            id: event.id,
            name: event.name,
            start_date: event.start_date,
            end_date: event.end_date,
            effects: event.effects,
            is_active: event.is_active,
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRotationResponse {
    /// False when the active season still has time remaining
    pub rotated: bool,
    pub event: SeasonResponse,
    pub ended_event: Option<SeasonResponse>,
    pub shards_granted: usize,
}

impl From<SeasonRotation> for SeasonRotationResponse {
    fn from(rotation: SeasonRotation) -> Self {
        Self {
            rotated: rotation.rotated,
            event: rotation.event.into(),
            ended_event: rotation.ended.map(Into::into),
            shards_granted: rotation.shards_granted,
        }
    }
}

// ============================================
// Portals
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnlockPortalRequest {
    pub user_id: Uuid,
    /// Moonwell | Shadowgate | Dreamspire | Starforge
    pub portal: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnlockPortalResponse {
    pub success: bool,
    pub portal: String,
    /// Why the portal stayed closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<PortalDecision> for UnlockPortalResponse {
    fn from(decision: PortalDecision) -> Self {
        let reason = decision.reason();
        match decision {
            PortalDecision::Unlocked(unlock) => Self {
                success: true,
                portal: unlock.portal.to_string(),
                reason: None,
                unlocked_at: Some(unlock.unlocked_at),
            },
            PortalDecision::Denied { portal, .. } => Self {
                success: false,
                portal: portal.to_string(),
                reason,
                unlocked_at: None,
            },
        }
    }
}
