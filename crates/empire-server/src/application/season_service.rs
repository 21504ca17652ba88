//! Season Application Service
//!
//! Rotates the system-wide seasonal event. Meant to be triggered externally
//! (the CLI, a cron job or the optional in-process scheduler); it never
//! schedules itself.
//!
//! The one-active-event rule is not enforced transactionally. Two rotations
//! running at once can both create an event.

use std::sync::Arc;

use chrono::Utc;

use empire::domain::services::season_rotation;
use empire::{DomainError, SeasonRepository, SeasonalEvent, ShardRepository, TwinRepository};

#[derive(Debug, Clone)]
pub struct SeasonRotation {
    /// True when a new event was created
    pub rotated: bool,
    /// The event active after this call
    pub event: SeasonalEvent,
    /// The expired event deactivated by this call, if any
    pub ended: Option<SeasonalEvent>,
    pub shards_granted: usize,
}

pub struct SeasonService<E: SeasonRepository, T: TwinRepository, S: ShardRepository> {
    seasons: Arc<E>,
    twins: Arc<T>,
    shards: Arc<S>,
}

impl<E: SeasonRepository, T: TwinRepository, S: ShardRepository> SeasonService<E, T, S> {
    pub fn new(seasons: Arc<E>, twins: Arc<T>, shards: Arc<S>) -> Self {
        Self {
            seasons,
            twins,
            shards,
        }
    }

    pub async fn current(&self) -> Result<Option<SeasonalEvent>, DomainError> {
        self.seasons.find_active().await
    }

    pub async fn rotate(&self) -> Result<SeasonRotation, DomainError> {
        let now = Utc::now();
        let mut ended = None;

        if let Some(active) = self.seasons.find_active().await? {
            if !active.has_ended(now) {
                return Ok(SeasonRotation {
                    rotated: false,
                    event: active,
                    ended: None,
                    shards_granted: 0,
                });
            }
            self.seasons.deactivate(active.id).await?;
            tracing::info!("🍂 Season \"{}\" has ended", active.name);
            ended = Some(active);
        }

        // Another event may still be flagged active
        if let Some(active) = self.seasons.find_active().await? {
            tracing::warn!("⚠️  Season \"{}\" still active after rotation check", active.name);
            return Ok(SeasonRotation {
                rotated: false,
                event: active,
                ended,
                shards_granted: 0,
            });
        }

        let latest = self.seasons.find_latest().await?;
        let next = season_rotation::next_event(latest.as_ref().map(|e| e.name.as_str()), now);
        let event = self.seasons.insert(&next).await?;

        let shards: Vec<_> = self
            .twins
            .find_active()
            .await?
            .iter()
            .map(|twin| season_rotation::seasonal_shard(twin.id, &event))
            .collect();
        let shards_granted = self.shards.insert_many(&shards).await?;

        tracing::info!(
            "🌸 Season \"{}\" begins (ends {}), {} seasonal shards granted",
            event.name,
            event.end_date.format("%Y-%m-%d"),
            shards_granted
        );

        Ok(SeasonRotation {
            rotated: true,
            event,
            ended,
            shards_granted,
        })
    }
}
