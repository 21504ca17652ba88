//! Twin Application Service
//!
//! Registry operations: create, fetch, visibility and the stats record.

use std::sync::Arc;

use uuid::Uuid;

use empire::domain::tables::TONES;
use empire::{Alignment, DomainError, Twin, TwinRepository, TwinStats, Visibility};

pub struct TwinService<T: TwinRepository> {
    twins: Arc<T>,
}

impl<T: TwinRepository> TwinService<T> {
    pub fn new(twins: Arc<T>) -> Self {
        Self { twins }
    }

    /// Create the user's twin. One twin per user.
    pub async fn create(
        &self,
        user_id: Uuid,
        username: String,
        alignment: &str,
        tone: &str,
        personality: String,
    ) -> Result<Twin, DomainError> {
        let alignment: Alignment = alignment.parse().map_err(DomainError::InvalidInput)?;
        if !TONES.contains(&tone) {
            return Err(DomainError::InvalidInput(format!("Invalid tone: {}", tone)));
        }
        if username.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Username must not be empty".to_string(),
            ));
        }
        if self.twins.find_by_user(user_id).await?.is_some() {
            return Err(DomainError::InvalidInput(format!(
                "User {} already has a twin",
                user_id
            )));
        }

        let twin = Twin::new(user_id, username, alignment, tone.to_string(), personality);
        let twin = self.twins.create(&twin).await?;

        tracing::info!("🪞 Created twin {} ({})", twin.username, twin.id);

        Ok(twin)
    }

    pub async fn get(&self, twin_id: Uuid) -> Result<Twin, DomainError> {
        self.twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))
    }

    /// `visibility` is the raw request value; unknown values are InvalidInput
    pub async fn set_visibility(&self, twin_id: Uuid, visibility: &str) -> Result<Twin, DomainError> {
        let visibility: Visibility = visibility.parse().map_err(DomainError::InvalidInput)?;
        if self.twins.find_by_id(twin_id).await?.is_none() {
            return Err(DomainError::not_found("Twin", twin_id));
        }
        let twin = self.twins.update_visibility(twin_id, visibility).await?;

        tracing::info!("👁️  Twin {} is now {}", twin.username, twin.visibility);

        Ok(twin)
    }

    /// Stats record, or defaults if the twin has never been granted XP through it
    pub async fn stats(&self, twin_id: Uuid) -> Result<TwinStats, DomainError> {
        self.get(twin_id).await?;
        Ok(self
            .twins
            .find_stats(twin_id)
            .await?
            .unwrap_or_else(|| TwinStats::new_for_twin(twin_id)))
    }
}
