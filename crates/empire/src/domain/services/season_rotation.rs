//! Seasonal event rotation rules

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{MemoryShard, SeasonalEvent};
use crate::domain::tables::{self, SEASONAL_SHARD_XP, SEASON_DURATION_DAYS};
use crate::domain::value_objects::{Rarity, SeasonName};

/// Event to create after `latest_name` (the most recently created event, active or not)
pub fn next_event(latest_name: Option<&str>, now: DateTime<Utc>) -> SeasonalEvent {
    let season = SeasonName::successor_of(latest_name);
    SeasonalEvent::new(
        season,
        now,
        Duration::days(SEASON_DURATION_DAYS),
        tables::season_effects(season),
    )
}

/// Shard granted to each active twin when a season begins
pub fn seasonal_shard(twin_id: Uuid, event: &SeasonalEvent) -> MemoryShard {
    MemoryShard::new(
        twin_id,
        "seasonal",
        format!("Memory of {}", event.name),
        Rarity::Rare,
        SEASONAL_SHARD_XP,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_awakening() {
        let now = Utc::now();
        let event = next_event(None, now);
        assert_eq!(event.name, "The Awakening");
        assert!(event.is_active);
        assert_eq!(event.end_date - event.start_date, Duration::days(90));
        assert_eq!(event.effects["xp_multiplier"], 1.25);
    }

    #[test]
    fn test_four_rotations_cycle_back() {
        let mut now = Utc::now();
        let first = next_event(None, now);
        let mut latest = first.name.clone();
        for _ in 0..4 {
            now += Duration::days(91);
            latest = next_event(Some(&latest), now).name;
        }
        assert_eq!(latest, first.name);
    }

    #[test]
    fn test_seasonal_shard() {
        let event = next_event(Some("The Radiant Bloom"), Utc::now());
        let shard = seasonal_shard(Uuid::new_v4(), &event);
        assert_eq!(shard.shard_type, "seasonal");
        assert_eq!(shard.rarity, Rarity::Rare);
        assert_eq!(shard.xp, 50);
        assert_eq!(shard.value, "Memory of The Eclipse Convergence");
    }
}
