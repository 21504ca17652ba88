//! Season Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, SeasonalEvent};

/// Repository interface for SeasonalEvent entities
#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// The event flagged active, if any
    async fn find_active(&self) -> Result<Option<SeasonalEvent>, DomainError>;

    /// The most recently created event, active or not
    async fn find_latest(&self) -> Result<Option<SeasonalEvent>, DomainError>;

    /// Clear the active flag
    async fn deactivate(&self, id: Uuid) -> Result<(), DomainError>;

    /// Insert a new event
    async fn insert(&self, event: &SeasonalEvent) -> Result<SeasonalEvent, DomainError>;
}
