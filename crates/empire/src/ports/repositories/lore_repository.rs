//! Lore Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, LoreEntry};

/// Repository interface for LoreEntry entities (append-only)
#[async_trait]
pub trait LoreRepository: Send + Sync {
    async fn insert(&self, entry: &LoreEntry) -> Result<LoreEntry, DomainError>;

    /// Entries of a Twin, newest first
    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<LoreEntry>, DomainError>;
}
