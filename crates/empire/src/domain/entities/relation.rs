//! Twin Relation - Directed affinity edge between two twins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::RelationType;

/// Unique per (twin_id, target_twin_id); recomputation replaces the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinRelation {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub target_twin_id: Uuid,
    pub relation_type: RelationType,
    /// 0..=100
    pub strength: i32,
    pub updated_at: DateTime<Utc>,
}

impl TwinRelation {
    pub fn new(
        twin_id: Uuid,
        target_twin_id: Uuid,
        relation_type: RelationType,
        strength: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            twin_id,
            target_twin_id,
            relation_type,
            strength: strength.clamp(0, 100),
            updated_at: Utc::now(),
        }
    }
}
