//! Twin Repository Port
//!
//! Abstract interface for Twin and TwinStats persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Twin, TwinStats, Visibility};

/// Repository interface for Twin entities
#[async_trait]
pub trait TwinRepository: Send + Sync {
    /// Find a Twin by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Twin>, DomainError>;

    /// Find the Twin owned by a user
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Twin>, DomainError>;

    /// Find all Twins flagged active
    async fn find_active(&self) -> Result<Vec<Twin>, DomainError>;

    /// Insert a new Twin
    async fn create(&self, twin: &Twin) -> Result<Twin, DomainError>;

    /// Overwrite level, xp and traits
    async fn update_progress(
        &self,
        id: Uuid,
        level: i32,
        xp: i32,
        traits: &[String],
    ) -> Result<Twin, DomainError>;

    /// Overwrite level and xp only (mirrored from the stats record)
    async fn update_level_xp(&self, id: Uuid, level: i32, xp: i32) -> Result<(), DomainError>;

    /// Replace the personality text
    async fn update_personality(&self, id: Uuid, personality: &str) -> Result<Twin, DomainError>;

    /// Change visibility
    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<Twin, DomainError>;

    /// Find the stats record for a Twin
    async fn find_stats(&self, twin_id: Uuid) -> Result<Option<TwinStats>, DomainError>;

    /// Create the stats record for a Twin seen for the first time
    async fn create_stats(&self, twin_id: Uuid) -> Result<TwinStats, DomainError>;

    /// Save a stats record
    async fn save_stats(&self, stats: &TwinStats) -> Result<TwinStats, DomainError>;
}
