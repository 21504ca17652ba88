//! PostgreSQL implementation of TwinRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, Twin, TwinRepository, TwinStats, Visibility};

/// PostgreSQL implementation of TwinRepository
pub struct PgTwinRepository {
    pool: PgPool,
}

impl PgTwinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TwinRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    personality: String,
    alignment: String,
    tone: String,
    traits: Vec<String>,
    level: i32,
    xp: i32,
    is_active: bool,
    visibility: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TwinRow> for Twin {
    fn from(row: TwinRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            personality: row.personality,
            alignment: row.alignment,
            tone: row.tone,
            traits: row.traits,
            level: row.level,
            xp: row.xp,
            is_active: row.is_active,
            visibility: row.visibility.parse().unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TwinStatsRow {
    id: Uuid,
    twin_id: Uuid,
    xp: i32,
    level: i32,
    wisdom: i32,
    chaos: i32,
    clarity: i32,
    shadow: i32,
    harmony: i32,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TwinStatsRow> for TwinStats {
    fn from(row: TwinStatsRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            xp: row.xp,
            level: row.level,
            wisdom: row.wisdom,
            chaos: row.chaos,
            clarity: row.clarity,
            shadow: row.shadow,
            harmony: row.harmony,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TwinRepository for PgTwinRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Twin>, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>("SELECT * FROM twins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Twin>, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>("SELECT * FROM twins WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_active(&self) -> Result<Vec<Twin>, DomainError> {
        let rows = sqlx::query_as::<_, TwinRow>(
            "SELECT * FROM twins WHERE is_active = TRUE ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, twin: &Twin) -> Result<Twin, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>(
            r#"
            INSERT INTO twins (id, user_id, username, personality, alignment, tone, traits,
                               level, xp, is_active, visibility)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(twin.id)
        .bind(twin.user_id)
        .bind(&twin.username)
        .bind(&twin.personality)
        .bind(&twin.alignment)
        .bind(&twin.tone)
        .bind(&twin.traits)
        .bind(twin.level)
        .bind(twin.xp)
        .bind(twin.is_active)
        .bind(twin.visibility.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        level: i32,
        xp: i32,
        traits: &[String],
    ) -> Result<Twin, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>(
            r#"
            UPDATE twins
            SET level = $2, xp = $3, traits = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(level)
        .bind(xp)
        .bind(traits)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("Twin", id))?;

        Ok(row.into())
    }

    async fn update_level_xp(&self, id: Uuid, level: i32, xp: i32) -> Result<(), DomainError> {
        sqlx::query("UPDATE twins SET level = $2, xp = $3, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(level)
            .bind(xp)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn update_personality(&self, id: Uuid, personality: &str) -> Result<Twin, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>(
            "UPDATE twins SET personality = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(personality)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("Twin", id))?;

        Ok(row.into())
    }

    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<Twin, DomainError> {
        let row = sqlx::query_as::<_, TwinRow>(
            "UPDATE twins SET visibility = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(visibility.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("Twin", id))?;

        Ok(row.into())
    }

    async fn find_stats(&self, twin_id: Uuid) -> Result<Option<TwinStats>, DomainError> {
        // First-inserted row wins if a concurrent first grant inserted twice
        let row = sqlx::query_as::<_, TwinStatsRow>(
            "SELECT * FROM twin_stats WHERE twin_id = $1 ORDER BY created_at, id LIMIT 1",
        )
        .bind(twin_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn create_stats(&self, twin_id: Uuid) -> Result<TwinStats, DomainError> {
        let stats = TwinStats::new_for_twin(twin_id);
        let row = sqlx::query_as::<_, TwinStatsRow>(
            r#"
            INSERT INTO twin_stats (id, twin_id, xp, level, wisdom, chaos, clarity, shadow, harmony)
            VALUES ($1, $2, $3, $4, 0, 0, 0, 0, 0)
            RETURNING *
            "#,
        )
        .bind(stats.id)
        .bind(twin_id)
        .bind(stats.xp)
        .bind(stats.level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn save_stats(&self, stats: &TwinStats) -> Result<TwinStats, DomainError> {
        let row = sqlx::query_as::<_, TwinStatsRow>(
            r#"
            UPDATE twin_stats
            SET xp = $2, level = $3, wisdom = $4, chaos = $5, clarity = $6,
                shadow = $7, harmony = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(stats.id)
        .bind(stats.xp)
        .bind(stats.level)
        .bind(stats.wisdom)
        .bind(stats.chaos)
        .bind(stats.clarity)
        .bind(stats.shadow)
        .bind(stats.harmony)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("TwinStats", stats.id))?;

        Ok(row.into())
    }
}
