//! Quest Repository Port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{errors::DomainError, Quest};

/// Repository interface for Quest entities
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Quests of a Twin that expire after `now`
    async fn find_unexpired(
        &self,
        twin_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Quest>, DomainError>;

    /// Find a Quest by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError>;

    /// Insert a batch of new quests
    async fn insert_many(&self, quests: &[Quest]) -> Result<Vec<Quest>, DomainError>;

    /// Flag a quest completed
    async fn mark_completed(&self, id: Uuid) -> Result<Quest, DomainError>;
}
