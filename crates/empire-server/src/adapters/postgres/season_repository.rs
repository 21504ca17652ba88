//! PostgreSQL implementation of SeasonRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, SeasonRepository, SeasonalEvent};

pub struct PgSeasonRepository {
    pool: PgPool,
}

impl PgSeasonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SeasonRow {
    id: Uuid,
    name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    effects: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<SeasonRow> for SeasonalEvent {
    fn from(row: SeasonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            effects: row.effects,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SeasonRepository for PgSeasonRepository {
    async fn find_active(&self) -> Result<Option<SeasonalEvent>, DomainError> {
        let row = sqlx::query_as::<_, SeasonRow>(
            "SELECT * FROM seasonal_events WHERE is_active = TRUE ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_latest(&self) -> Result<Option<SeasonalEvent>, DomainError> {
        let row = sqlx::query_as::<_, SeasonRow>(
            "SELECT * FROM seasonal_events ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE seasonal_events SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn insert(&self, event: &SeasonalEvent) -> Result<SeasonalEvent, DomainError> {
        let row = sqlx::query_as::<_, SeasonRow>(
            r#"
            INSERT INTO seasonal_events (id, name, start_date, end_date, effects, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.effects)
        .bind(event.is_active)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }
}
