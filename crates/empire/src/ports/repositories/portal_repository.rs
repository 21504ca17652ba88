//! Portal Repository Port
//!
//! Unlock records plus the read-only ritual records used as a prerequisite.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, PortalUnlock};

/// Repository interface for PortalUnlock entities
#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// Whether any ritual record exists for the user
    async fn has_completed_ritual(&self, user_id: Uuid) -> Result<bool, DomainError>;

    /// Insert or refresh the unlock keyed by (user_id, portal)
    async fn upsert_unlock(&self, unlock: &PortalUnlock) -> Result<PortalUnlock, DomainError>;
}
