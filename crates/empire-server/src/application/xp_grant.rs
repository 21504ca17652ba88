//! Detached XP grants
//!
//! Handlers that award XP as a side effect (imprint, training, quest
//! completion) do not wait for the grant. The grant runs on its own task,
//! its outcome is logged and then discarded, and a failure never reaches the
//! caller of the outer handler.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use uuid::Uuid;

use super::leveling::LevelingPolicy;

/// Handle to a spawned XP grant. Dropping it detaches the task.
#[must_use = "call `detach()` to make fire-and-forget explicit"]
pub struct XpGrantTask {
    handle: JoinHandle<()>,
}

impl XpGrantTask {
    pub fn spawn(
        policy: Arc<dyn LevelingPolicy>,
        twin_id: Uuid,
        xp_gain: i32,
        source: &'static str,
    ) -> Self {
        let handle = tokio::spawn(async move {
            match policy.grant_xp(twin_id, xp_gain, source).await {
                Ok(outcome) => tracing::info!(
                    "✨ {} granted {} xp to {} via {} (level {})",
                    source,
                    xp_gain,
                    twin_id,
                    policy.name(),
                    outcome.progress.level
                ),
                Err(e) => tracing::warn!(
                    "⚠️  {} xp grant for {} failed via {}: {}",
                    source,
                    twin_id,
                    policy.name(),
                    e
                ),
            }
        });
        Self { handle }
    }

    /// Let the grant finish on its own
    pub fn detach(self) {}

    /// Wait for the grant to finish
    pub async fn join(self) -> Result<(), JoinError> {
        self.handle.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore};
    use crate::application::leveling::StatsLeveling;

    #[tokio::test]
    async fn test_grant_applies_in_background() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let policy: Arc<dyn LevelingPolicy> =
            Arc::new(StatsLeveling::new(store.clone(), store.clone()));

        XpGrantTask::spawn(policy, twin.id, 50, "test")
            .join()
            .await
            .unwrap();

        assert_eq!(store.stats(twin.id).unwrap().level, 2);
    }

    #[tokio::test]
    async fn test_failed_grant_is_swallowed() {
        let store = Arc::new(InMemoryStore::default());
        let policy: Arc<dyn LevelingPolicy> =
            Arc::new(StatsLeveling::new(store.clone(), store.clone()));

        // Missing twin: the task logs and completes without panicking
        let result = XpGrantTask::spawn(policy, Uuid::new_v4(), 50, "test")
            .join()
            .await;
        assert!(result.is_ok());
    }
}
