//! Twin Memory - Append-only imprint/training entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MemoryKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinMemory {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub content: String,
    pub kind: MemoryKind,
    pub created_at: DateTime<Utc>,
}

impl TwinMemory {
    pub fn new(twin_id: Uuid, content: String, kind: MemoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            twin_id,
            content,
            kind,
            created_at: Utc::now(),
        }
    }
}
