//! PostgreSQL implementation of PortalRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, PortalRepository, PortalUnlock};

pub struct PgPortalRepository {
    pool: PgPool,
}

impl PgPortalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PortalUnlockRow {
    id: Uuid,
    user_id: Uuid,
    portal: String,
    unlocked: bool,
    unlocked_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<PortalUnlockRow> for PortalUnlock {
    type Error = DomainError;

    fn try_from(row: PortalUnlockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            portal: row.portal.parse().map_err(DomainError::Repository)?,
            unlocked: row.unlocked,
            unlocked_at: row.unlocked_at,
        })
    }
}

#[async_trait]
impl PortalRepository for PgPortalRepository {
    async fn has_completed_ritual(&self, user_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rituals WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn upsert_unlock(&self, unlock: &PortalUnlock) -> Result<PortalUnlock, DomainError> {
        let row = sqlx::query_as::<_, PortalUnlockRow>(
            r#"
            INSERT INTO portal_unlocks (id, user_id, portal, unlocked, unlocked_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, portal)
            DO UPDATE SET unlocked = EXCLUDED.unlocked, unlocked_at = EXCLUDED.unlocked_at
            RETURNING *
            "#,
        )
        .bind(unlock.id)
        .bind(unlock.user_id)
        .bind(unlock.portal.as_str())
        .bind(unlock.unlocked)
        .bind(unlock.unlocked_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }
}
