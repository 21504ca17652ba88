//! Season Scheduler - periodic seasonal event rotation
//!
//! Calls the same rotation the `/seasonal-event-rotation` handler runs, so an
//! external cron is optional.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use empire::{DomainError, SeasonRepository, ShardRepository, TwinRepository};

use crate::application::{SeasonRotation, SeasonService};

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval between rotation checks
    pub interval: Duration,
    /// Enable/disable scheduler
    pub enabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(86400), // 1 day
            enabled: true,
        }
    }
}

/// Season rotation scheduler
pub struct SeasonScheduler<E: SeasonRepository, T: TwinRepository, S: ShardRepository> {
    service: Arc<SeasonService<E, T, S>>,
    config: SchedulerConfig,
}

impl<E, T, S> SeasonScheduler<E, T, S>
where
    E: SeasonRepository + 'static,
    T: TwinRepository + 'static,
    S: ShardRepository + 'static,
{
    pub fn new(service: Arc<SeasonService<E, T, S>>, config: Option<SchedulerConfig>) -> Self {
        Self {
            service,
            config: config.unwrap_or_default(),
        }
    }

    /// Start the scheduler (runs in background)
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// One rotation check; errors are logged and returned
    pub async fn tick(&self) -> Result<SeasonRotation, DomainError> {
        let result = self.service.rotate().await;
        match &result {
            Ok(rotation) if rotation.rotated => {
                tracing::info!(
                    "🔄 Scheduler: \"{}\" started, {} shards granted",
                    rotation.event.name,
                    rotation.shards_granted
                );
            }
            Ok(rotation) => {
                tracing::debug!("🔄 Scheduler: \"{}\" still running", rotation.event.name);
            }
            Err(e) => {
                tracing::warn!("  ❌ Scheduler: season rotation failed: {}", e);
            }
        }
        result
    }

    async fn run(self) {
        if !self.config.enabled {
            tracing::info!("📅 Season scheduler disabled");
            return;
        }

        tracing::info!(
            "📅 Season scheduler started (interval: {:?})",
            self.config.interval
        );

        let mut ticker = interval(self.config.interval);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let _ = self.tick().await;
        }
    }
}

/// Start the scheduler when an interval is configured
pub fn maybe_start_scheduler<E, T, S>(
    service: Arc<SeasonService<E, T, S>>,
    interval_secs: Option<u64>,
) -> Option<tokio::task::JoinHandle<()>>
where
    E: SeasonRepository + 'static,
    T: TwinRepository + 'static,
    S: ShardRepository + 'static,
{
    let secs = interval_secs.filter(|s| *s > 0)?;

    let config = SchedulerConfig {
        interval: Duration::from_secs(secs),
        enabled: true,
    };

    Some(SeasonScheduler::new(service, Some(config)).start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore};

    fn service(store: &Arc<InMemoryStore>) -> Arc<SeasonService<InMemoryStore, InMemoryStore, InMemoryStore>> {
        Arc::new(SeasonService::new(store.clone(), store.clone(), store.clone()))
    }

    #[test]
    fn test_no_interval_means_no_scheduler() {
        let store = Arc::new(InMemoryStore::default());
        assert!(maybe_start_scheduler(service(&store), None).is_none());
        assert!(maybe_start_scheduler(service(&store), Some(0)).is_none());
    }

    #[tokio::test]
    async fn test_interval_starts_scheduler() {
        let store = Arc::new(InMemoryStore::default());
        let handle = maybe_start_scheduler(service(&store), Some(3600)).unwrap();
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test]
    async fn test_tick_rotates_then_holds() {
        let store = Arc::new(InMemoryStore::default());
        seed_twin(&store, "neutral", "calm");
        let scheduler = SeasonScheduler::new(service(&store), None);

        let first = scheduler.tick().await.unwrap();
        assert!(first.rotated);
        assert_eq!(first.shards_granted, 1);

        let second = scheduler.tick().await.unwrap();
        assert!(!second.rotated);
        assert_eq!(store.seasons().len(), 1);
    }
}
