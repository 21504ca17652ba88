//! Quest Application Service
//!
//! Daily quest assignment and completion.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use empire::domain::services::quest_assignment;
use empire::{DomainError, Quest, QuestRepository};

use super::leveling::LevelingPolicy;
use super::xp_grant::XpGrantTask;

/// Result of an assignment request
#[derive(Debug, Clone)]
pub struct QuestAssignment {
    /// False when unexpired quests already existed
    pub assigned: bool,
    pub quests: Vec<Quest>,
}

/// Application service for quests.
///
/// Assignment checks for unexpired quests and inserts in two separate
/// steps; two concurrent calls for the same twin can both insert a batch.
pub struct QuestService<Q: QuestRepository> {
    quests: Arc<Q>,
    leveling: Arc<dyn LevelingPolicy>,
}

impl<Q: QuestRepository> QuestService<Q> {
    pub fn new(quests: Arc<Q>, leveling: Arc<dyn LevelingPolicy>) -> Self {
        Self { quests, leveling }
    }

    /// Assign 2-3 quests unless the twin still has unexpired ones
    pub async fn assign_daily(&self, twin_id: Uuid) -> Result<QuestAssignment, DomainError> {
        let now = Utc::now();
        let existing = self.quests.find_unexpired(twin_id, now).await?;
        if !existing.is_empty() {
            return Ok(QuestAssignment {
                assigned: false,
                quests: existing,
            });
        }

        let drawn = {
            let mut rng = rand::thread_rng();
            quest_assignment::draw_daily_quests(&mut rng, twin_id, now)
        };
        let quests = self.quests.insert_many(&drawn).await?;

        tracing::info!("📜 Assigned {} quests to twin {}", quests.len(), twin_id);

        Ok(QuestAssignment {
            assigned: true,
            quests,
        })
    }

    /// Unexpired quests of a twin
    pub async fn list_active(&self, twin_id: Uuid) -> Result<Vec<Quest>, DomainError> {
        self.quests.find_unexpired(twin_id, Utc::now()).await
    }

    /// Mark a quest completed and grant its reward in the background
    pub async fn complete(&self, quest_id: Uuid) -> Result<(Quest, XpGrantTask), DomainError> {
        let quest = self
            .quests
            .find_by_id(quest_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Quest", quest_id))?;

        if quest.completed {
            return Err(DomainError::InvalidInput(format!(
                "Quest {} is already completed",
                quest_id
            )));
        }
        if quest.is_expired(Utc::now()) {
            return Err(DomainError::InvalidInput(format!(
                "Quest {} has expired",
                quest_id
            )));
        }

        let quest = self.quests.mark_completed(quest_id).await?;
        let grant = XpGrantTask::spawn(
            self.leveling.clone(),
            quest.twin_id,
            quest.xp_reward,
            "quest",
        );

        tracing::info!("🏁 Quest {} completed by twin {}", quest.id, quest.twin_id);

        Ok((quest, grant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore};
    use crate::application::leveling::StatsLeveling;
    use chrono::Duration;

    fn service(store: &Arc<InMemoryStore>) -> QuestService<InMemoryStore> {
        let leveling = Arc::new(StatsLeveling::new(store.clone(), store.clone()));
        QuestService::new(store.clone(), leveling)
    }

    #[tokio::test]
    async fn test_assign_inserts_two_or_three() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");

        let result = service(&store).assign_daily(twin.id).await.unwrap();

        assert!(result.assigned);
        assert!((2..=3).contains(&result.quests.len()));
        assert!(result.quests.iter().all(|q| !q.completed));
        let texts: std::collections::HashSet<_> =
            result.quests.iter().map(|q| q.quest_text.clone()).collect();
        assert_eq!(texts.len(), result.quests.len());
    }

    #[tokio::test]
    async fn test_assign_twice_inserts_one_batch() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let service = service(&store);

        let first = service.assign_daily(twin.id).await.unwrap();
        let second = service.assign_daily(twin.id).await.unwrap();

        assert!(first.assigned);
        assert!(!second.assigned);
        assert_eq!(second.quests.len(), first.quests.len());
        assert_eq!(store.quest_batches(), 1);
    }

    #[tokio::test]
    async fn test_expired_quests_do_not_block_assignment() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        store.put_quest(Quest::new(
            twin.id,
            "old",
            10,
            Utc::now() - Duration::days(2),
            Duration::days(1),
        ));

        let result = service(&store).assign_daily(twin.id).await.unwrap();
        assert!(result.assigned);
    }

    #[tokio::test]
    async fn test_complete_grants_reward() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let quest = Quest::new(twin.id, "walk", 60, Utc::now(), Duration::days(1));
        store.put_quest(quest.clone());

        let (completed, grant) = service(&store).complete(quest.id).await.unwrap();
        grant.join().await.unwrap();

        assert!(completed.completed);
        assert_eq!(store.stats(twin.id).unwrap().xp, 60);
    }

    #[tokio::test]
    async fn test_complete_twice_is_invalid() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let quest = Quest::new(twin.id, "walk", 10, Utc::now(), Duration::days(1));
        store.put_quest(quest.clone());
        let service = service(&store);

        let (_, grant) = service.complete(quest.id).await.unwrap();
        grant.detach();
        assert!(matches!(
            service.complete(quest.id).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_unknown_quest_is_not_found() {
        let store = Arc::new(InMemoryStore::default());
        assert!(matches!(
            service(&store).complete(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
