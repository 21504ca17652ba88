//! Quest - Daily task assigned to a twin

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub twin_id: Uuid,
    pub quest_text: String,
    pub xp_reward: i32,
    pub completed: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Quest {
    pub fn new(
        twin_id: Uuid,
        quest_text: impl Into<String>,
        xp_reward: i32,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            twin_id,
            quest_text: quest_text.into(),
            xp_reward,
            completed: false,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_horizon() {
        let now = Utc::now();
        let quest = Quest::new(Uuid::new_v4(), "Share a thought", 20, now, Duration::days(1));
        assert!(!quest.is_expired(now));
        assert!(!quest.is_expired(now + Duration::hours(23)));
        assert!(quest.is_expired(now + Duration::days(1)));
        assert!(!quest.completed);
    }
}
