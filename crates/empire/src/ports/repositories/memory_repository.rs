//! Memory Repository Port
//!
//! Twin memories written by the imprint and training handlers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, TwinMemory};

/// Repository interface for TwinMemory entities (append-only)
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Append a memory
    async fn add(&self, memory: &TwinMemory) -> Result<TwinMemory, DomainError>;

    /// Latest memories of a Twin, newest first
    async fn recent(&self, twin_id: Uuid, limit: i64) -> Result<Vec<TwinMemory>, DomainError>;
}
