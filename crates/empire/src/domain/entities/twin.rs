//! Twin - Per-user AI companion with progression
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Alignment, StatAttribute, Visibility};

/// Twin - Core companion identity and progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Twin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    /// Personality text, rewritten by text generation on level-up and training
    pub personality: String,
    /// Stored as text; see [`Alignment::score_of`] for how unknown values score
    pub alignment: String,
    pub tone: String,
    /// Append-only, grows on level-up
    pub traits: Vec<String>,
    pub level: i32,
    pub xp: i32,
    pub is_active: bool,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Twin {
    /// Create a fresh level-1 twin for a user
    pub fn new(
        user_id: Uuid,
        username: String,
        alignment: Alignment,
        tone: String,
        personality: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            username,
            personality,
            alignment: alignment.to_string(),
            tone,
            traits: Vec::new(),
            level: 1,
            xp: 0,
            is_active: true,
            visibility: Visibility::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Traits shared with another twin (exact string match)
    pub fn shared_traits(&self, other: &Twin) -> usize {
        self.traits
            .iter()
            .filter(|t| other.traits.contains(t))
            .count()
    }
}

/// Twin Stats - Parallel leveling record used by the stats leveling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinStats {
    pub id: Uuid,
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

impl TwinStats {
    /// Default stats for a twin seen for the first time
    pub fn new_for_twin(twin_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            twin_id,
            xp: 0,
            level: 1,
            wisdom: 0,
            chaos: 0,
            clarity: 0,
            shadow: 0,
            harmony: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn attribute(&self, attribute: StatAttribute) -> i32 {
        match attribute {
            StatAttribute::Wisdom => self.wisdom,
            StatAttribute::Chaos => self.chaos,
            StatAttribute::Clarity => self.clarity,
            StatAttribute::Shadow => self.shadow,
            StatAttribute::Harmony => self.harmony,
        }
    }

    pub fn increment(&mut self, attribute: StatAttribute) {
        match attribute {
            StatAttribute::Wisdom => self.wisdom += 1,
            StatAttribute::Chaos => self.chaos += 1,
            StatAttribute::Clarity => self.clarity += 1,
            StatAttribute::Shadow => self.shadow += 1,
            StatAttribute::Harmony => self.harmony += 1,
        }
    }

    pub fn attribute_total(&self) -> i32 {
        StatAttribute::ALL.iter().map(|a| self.attribute(*a)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_twin_defaults() {
        let twin = Twin::new(
            Uuid::new_v4(),
            "mirror".to_string(),
            Alignment::Radiant,
            "wise".to_string(),
            "A calm reflection".to_string(),
        );
        assert_eq!(twin.level, 1);
        assert_eq!(twin.xp, 0);
        assert_eq!(twin.alignment, "radiant");
        assert!(twin.is_active);
        assert_eq!(twin.visibility, Visibility::Public);
        assert!(twin.traits.is_empty());
    }

    #[test]
    fn test_shared_traits() {
        let mut a = Twin::new(
            Uuid::new_v4(),
            "a".into(),
            Alignment::Neutral,
            "calm".into(),
            String::new(),
        );
        let mut b = a.clone();
        a.traits = vec!["Curious".into(), "Empathic".into(), "Sage".into()];
        b.traits = vec!["Sage".into(), "Curious".into()];
        assert_eq!(a.shared_traits(&b), 2);
    }

    #[test]
    fn test_stats_increment() {
        let mut stats = TwinStats::new_for_twin(Uuid::new_v4());
        stats.increment(StatAttribute::Chaos);
        stats.increment(StatAttribute::Chaos);
        stats.increment(StatAttribute::Harmony);
        assert_eq!(stats.attribute(StatAttribute::Chaos), 2);
        assert_eq!(stats.attribute_total(), 3);
    }
}
