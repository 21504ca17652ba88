//! Lore Entry - Poetic fragment generated on level-up

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: Uuid,
    pub twin_id: Uuid,
    /// Level at which the entry was written
    pub level: i32,
    pub entry: String,
    pub created_at: DateTime<Utc>,
}

impl LoreEntry {
    pub fn new(twin_id: Uuid, level: i32, entry: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            twin_id,
            level,
            entry,
            created_at: Utc::now(),
        }
    }
}
