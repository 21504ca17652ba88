//! Seasonal Event - Time-boxed global modifier period

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::SeasonName;

/// At most one event is active system-wide. Nothing enforces this
/// transactionally; rotation is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalEvent {
    pub id: Uuid,
    /// One of the [`SeasonName`] titles, kept as text as stored
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub effects: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SeasonalEvent {
    pub fn new(
        season: SeasonName,
        start: DateTime<Utc>,
        duration: Duration,
        effects: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: season.as_str().to_string(),
            start_date: start,
            end_date: start + duration,
            effects,
            is_active: true,
            created_at: start,
        }
    }

    /// End date has passed
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }
}
