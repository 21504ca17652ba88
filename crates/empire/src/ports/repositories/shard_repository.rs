//! Shard Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, MemoryShard};

/// Repository interface for MemoryShard entities
#[async_trait]
pub trait ShardRepository: Send + Sync {
    /// All shards belonging to a Twin
    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<MemoryShard>, DomainError>;

    /// Insert a new shard
    async fn insert(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError>;

    /// Insert several shards (used when a season grants one per twin)
    async fn insert_many(&self, shards: &[MemoryShard]) -> Result<usize, DomainError>;

    /// Persist xp and rarity of an existing shard
    async fn update(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError>;
}
