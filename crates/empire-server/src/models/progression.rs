//! Progression DTOs - quests, shards, leveling and lore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use empire::{LoreEntry, MemoryShard, Quest};

use crate::application::{LevelUpOutcome, QuestAssignment, ShardEvolution};

// ============================================
// Quests
// ============================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestResponse {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub quest_text: String,
    pub xp_reward: i32,
    pub completed: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Quest> for QuestResponse {
    fn from(quest: Quest) -> Self {
        Self {
            id: quest.id,
            twin_id: quest.twin_id,
            quest_text: quest.quest_text,
            xp_reward: quest.xp_reward,
            completed: quest.completed,
            expires_at: quest.expires_at,
            created_at: quest.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignQuestsResponse {
    /// False when the twin already had unexpired quests
    pub assigned: bool,
    pub quests: Vec<QuestResponse>,
}

impl From<QuestAssignment> for AssignQuestsResponse {
    fn from(assignment: QuestAssignment) -> Self {
        Self {
            assigned: assignment.assigned,
            quests: assignment.quests.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestRequest {
    pub quest_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestResponse {
    pub success: bool,
    pub quest: QuestResponse,
    pub xp_pending: i32,
}

// ============================================
// Shards
// ============================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShardResponse {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub shard_type: String,
    pub value: String,
    /// common | rare | epic | mythic
    pub rarity: String,
    pub xp: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemoryShard> for ShardResponse {
    fn from(shard: MemoryShard) -> Self {
        Self {
            id: shard.id,
            twin_id: shard.twin_id,
            shard_type: shard.shard_type,
            value: shard.value,
            rarity: shard.rarity.to_string(),
            xp: shard.xp,
            created_at: shard.created_at,
            updated_at: shard.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolveShardsRequest {
    pub twin_id: Uuid,
    /// Activity description; "post", "reaction", "training" and "ritual" add bonus XP
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolveShardsResponse {
    pub xp_gained: i32,
    pub promoted: usize,
    pub shards: Vec<ShardResponse>,
    pub new_shard: Option<ShardResponse>,
}

impl From<ShardEvolution> for EvolveShardsResponse {
    fn from(evolution: ShardEvolution) -> Self {
        Self {
            xp_gained: evolution.xp_gained,
            promoted: evolution.promoted,
            shards: evolution.shards.into_iter().map(Into::into).collect(),
            new_shard: evolution.spawned.map(Into::into),
        }
    }
}

// ============================================
// Leveling
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantXpRequest {
    pub twin_id: Uuid,
    pub xp_gain: i32,
    /// Free-text origin of the grant, used in logs
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "manual".to_string()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpResponse {
    pub twin_id: Uuid,
    pub leveled_up: bool,
    pub previous_level: i32,
    pub level: i32,
    pub xp: i32,
    pub levels_gained: Vec<i32>,
    pub new_traits: Vec<String>,
    pub personality: Option<String>,
    pub attributes_raised: Vec<String>,
    pub new_shard: Option<ShardResponse>,
}

impl From<LevelUpOutcome> for LevelUpResponse {
    fn from(outcome: LevelUpOutcome) -> Self {
        Self {
            twin_id: outcome.twin_id,
            leveled_up: outcome.progress.leveled_up(),
            previous_level: outcome.progress.previous_level,
            level: outcome.progress.level,
            xp: outcome.progress.xp,
            levels_gained: outcome.progress.levels_gained,
            new_traits: outcome.new_traits,
            personality: outcome.personality,
            attributes_raised: outcome
                .attributes_raised
                .iter()
                .map(|a| a.to_string())
                .collect(),
            new_shard: outcome.shard.map(Into::into),
        }
    }
}

// ============================================
// Lore
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLoreRequest {
    pub twin_id: Uuid,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoreResponse {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub level: i32,
    pub entry: String,
    pub created_at: DateTime<Utc>,
}

impl From<LoreEntry> for LoreResponse {
    fn from(entry: LoreEntry) -> Self {
        Self {
            id: entry.id,
            twin_id: entry.twin_id,
            level: entry.level,
            entry: entry.entry,
            created_at: entry.created_at,
        }
    }
}
