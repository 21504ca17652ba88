//! Memory Shard - Unit of accumulated memory with a rarity tier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Rarity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryShard {
    pub id: Uuid,
    pub twin_id: Uuid,
    /// Free-text category (emotion, insight, seasonal, level_up, ...)
    pub shard_type: String,
    pub value: String,
    /// Only ever promoted, never demoted
    pub rarity: Rarity,
    pub xp: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemoryShard {
    pub fn new(
        twin_id: Uuid,
        shard_type: impl Into<String>,
        value: impl Into<String>,
        rarity: Rarity,
        xp: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            twin_id,
            shard_type: shard_type.into(),
            value: value.into(),
            rarity,
            xp,
            created_at: now,
            updated_at: now,
        }
    }
}
