//! Lore Application Service

use std::sync::Arc;

use uuid::Uuid;

use empire::{DomainError, LoreEntry, LoreRepository, TextGenerator, TwinRepository};

use super::prompts;

pub struct LoreService<L: LoreRepository, T: TwinRepository> {
    lore: Arc<L>,
    twins: Arc<T>,
    generator: Arc<dyn TextGenerator>,
}

impl<L: LoreRepository, T: TwinRepository> LoreService<L, T> {
    pub fn new(lore: Arc<L>, twins: Arc<T>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            lore,
            twins,
            generator,
        }
    }

    /// Generate and store a lore fragment for `level`.
    ///
    /// Text-generation failures propagate; nothing is stored in that case.
    pub async fn generate(&self, twin_id: Uuid, level: i32) -> Result<LoreEntry, DomainError> {
        let twin = self
            .twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))?;

        let fragment = self
            .generator
            .generate(&prompts::lore_fragment(&twin, level))
            .await?;
        if fragment.is_empty() {
            return Err(DomainError::ExternalService(
                "Text generation returned empty content".to_string(),
            ));
        }

        let entry = self
            .lore
            .insert(&LoreEntry::new(twin_id, level, fragment))
            .await?;

        tracing::info!("📖 Lore written for {} at level {}", twin.username, level);

        Ok(entry)
    }

    pub async fn list(&self, twin_id: Uuid) -> Result<Vec<LoreEntry>, DomainError> {
        self.lore.find_by_twin(twin_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore, ScriptedGenerator};

    #[tokio::test]
    async fn test_generate_stores_entry_at_level() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "radiant", "poetic");
        let generator = Arc::new(ScriptedGenerator::replying("  Starlight remembers.  "));
        let service = LoreService::new(store.clone(), store.clone(), generator.clone());

        let entry = service.generate(twin.id, 4).await.unwrap();

        assert_eq!(entry.level, 4);
        assert_eq!(entry.entry, "Starlight remembers.");
        assert_eq!(store.lore_of(twin.id).len(), 1);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt[1].content.contains(&twin.username));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "radiant", "poetic");
        let generator = Arc::new(ScriptedGenerator::failing(DomainError::QuotaExhausted));
        let service = LoreService::new(store.clone(), store.clone(), generator);

        assert!(matches!(
            service.generate(twin.id, 2).await,
            Err(DomainError::QuotaExhausted)
        ));
        assert!(store.lore_of(twin.id).is_empty());
    }

    #[tokio::test]
    async fn test_blank_generation_stores_nothing() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "radiant", "poetic");
        let service = LoreService::new(
            store.clone(),
            store.clone(),
            Arc::new(ScriptedGenerator::replying("  \n ")),
        );

        assert!(matches!(
            service.generate(twin.id, 3).await,
            Err(DomainError::ExternalService(_))
        ));
        assert!(store.lore_of(twin.id).is_empty());
    }
}
