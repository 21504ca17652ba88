//! Twin DTOs - registry, stats, imprint and training

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use empire::{Twin, TwinMemory, TwinStats};

/// Twin as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwinResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub personality: String,
    pub alignment: String,
    pub tone: String,
    pub traits: Vec<String>,
    pub level: i32,
    pub xp: i32,
    pub is_active: bool,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Twin> for TwinResponse {
    fn from(twin: Twin) -> Self {
        Self {
            id: twin.id,
            user_id: twin.user_id,
            username: twin.username,
            personality: twin.personality,
            alignment: twin.alignment,
            tone: twin.tone,
            traits: twin.traits,
            level: twin.level,
            xp: twin.xp,
            is_active: twin.is_active,
            visibility: twin.visibility.to_string(),
            created_at: twin.created_at,
            updated_at: twin.updated_at,
        }
    }
}

/// Stats record used by the `/twin-level-up` policy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwinStatsResponse {
    pub twin_id: Uuid,
    pub xp: i32,
    pub level: i32,
    pub wisdom: i32,
    pub chaos: i32,
    pub clarity: i32,
    pub shadow: i32,
    pub harmony: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<TwinStats> for TwinStatsResponse {
    fn from(stats: TwinStats) -> Self {
        Self {
            twin_id: stats.twin_id,
            xp: stats.xp,
            level: stats.level,
            wisdom: stats.wisdom,
            chaos: stats.chaos,
            clarity: stats.clarity,
            shadow: stats.shadow,
            harmony: stats.harmony,
            updated_at: stats.updated_at,
        }
    }
}

/// Create Twin request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTwinRequest {
    pub user_id: Uuid,
    pub username: String,
    /// radiant | neutral | shadow
    #[serde(default = "default_alignment")]
    pub alignment: String,
    /// wise | calm | playful | mysterious | fierce | poetic | sarcastic | gentle
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub personality: String,
}

fn default_alignment() -> String {
    "neutral".to_string()
}

fn default_tone() -> String {
    "calm".to_string()
}

/// Change visibility request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub twin_id: Uuid,
    /// public | followers | private
    pub visibility: String,
}

/// Request carrying only a twin id
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwinIdRequest {
    pub twin_id: Uuid,
}

/// Imprint memory request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImprintRequest {
    pub twin_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub content: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<TwinMemory> for MemoryResponse {
    fn from(memory: TwinMemory) -> Self {
        Self {
            id: memory.id,
            twin_id: memory.twin_id,
            content: memory.content,
            kind: memory.kind.to_string(),
            created_at: memory.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImprintResponse {
    pub success: bool,
    pub memory: MemoryResponse,
    /// XP granted in the background; the outcome is not reported here
    pub xp_pending: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    pub success: bool,
    pub twin: TwinResponse,
    pub xp_pending: i32,
}
