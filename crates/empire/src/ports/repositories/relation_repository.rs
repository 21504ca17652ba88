//! Relation Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, TwinRelation};

/// Repository interface for TwinRelation entities
#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Insert or replace the relation keyed by (twin_id, target_twin_id)
    async fn upsert(&self, relation: &TwinRelation) -> Result<TwinRelation, DomainError>;

    /// Outgoing relations of a Twin
    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<TwinRelation>, DomainError>;
}
