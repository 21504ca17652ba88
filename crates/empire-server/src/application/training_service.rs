//! Training / Imprint Application Service
//!
//! Both handlers finish their primary write first and then hand an XP grant
//! to a detached task. The grant's outcome never changes their response.

use std::sync::Arc;

use uuid::Uuid;

use empire::domain::tables::{IMPRINT_XP, TRAINING_XP};
use empire::{
    DomainError, MemoryKind, MemoryRepository, TextGenerator, Twin, TwinMemory, TwinRepository,
};

use super::leveling::LevelingPolicy;
use super::prompts;
use super::xp_grant::XpGrantTask;

/// Number of memories fed into a training run
pub const TRAINING_MEMORY_WINDOW: i64 = 10;

pub struct TrainingService<M: MemoryRepository, T: TwinRepository> {
    memories: Arc<M>,
    twins: Arc<T>,
    generator: Arc<dyn TextGenerator>,
    leveling: Arc<dyn LevelingPolicy>,
}

impl<M: MemoryRepository, T: TwinRepository> TrainingService<M, T> {
    pub fn new(
        memories: Arc<M>,
        twins: Arc<T>,
        generator: Arc<dyn TextGenerator>,
        leveling: Arc<dyn LevelingPolicy>,
    ) -> Self {
        Self {
            memories,
            twins,
            generator,
            leveling,
        }
    }

    /// Append a memory and grant imprint XP in the background
    pub async fn imprint(
        &self,
        twin_id: Uuid,
        content: String,
    ) -> Result<(TwinMemory, XpGrantTask), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Memory content must not be empty".to_string(),
            ));
        }
        if self.twins.find_by_id(twin_id).await?.is_none() {
            return Err(DomainError::not_found("Twin", twin_id));
        }

        let memory = self
            .memories
            .add(&TwinMemory::new(twin_id, content, MemoryKind::Imprint))
            .await?;

        tracing::info!("🪞 Memory imprinted on twin {}", twin_id);

        let grant = XpGrantTask::spawn(self.leveling.clone(), twin_id, IMPRINT_XP, "imprint");
        Ok((memory, grant))
    }

    /// Regenerate the personality from recent memories and grant training XP.
    ///
    /// Unlike the level-up rewrite, a text-generation failure fails the request.
    pub async fn train(&self, twin_id: Uuid) -> Result<(Twin, XpGrantTask), DomainError> {
        let twin = self
            .twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))?;

        let recent = self.memories.recent(twin_id, TRAINING_MEMORY_WINDOW).await?;
        let personality = self
            .generator
            .generate(&prompts::personality_from_memories(&twin, &recent))
            .await?;
        if personality.is_empty() {
            return Err(DomainError::ExternalService(
                "Text generation returned empty content".to_string(),
            ));
        }

        let twin = self.twins.update_personality(twin_id, &personality).await?;

        tracing::info!(
            "🎓 Twin {} trained on {} memories",
            twin.username,
            recent.len()
        );

        let grant = XpGrantTask::spawn(self.leveling.clone(), twin_id, TRAINING_XP, "training");
        Ok((twin, grant))
    }
}
