//! PostgreSQL implementation of LoreRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, LoreEntry, LoreRepository};

pub struct PgLoreRepository {
    pool: PgPool,
}

impl PgLoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LoreRow {
    id: Uuid,
    twin_id: Uuid,
    level: i32,
    entry: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LoreRow> for LoreEntry {
    fn from(row: LoreRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            level: row.level,
            entry: row.entry,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LoreRepository for PgLoreRepository {
    async fn insert(&self, entry: &LoreEntry) -> Result<LoreEntry, DomainError> {
        let row = sqlx::query_as::<_, LoreRow>(
            "INSERT INTO twin_lore (id, twin_id, level, entry) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(entry.id)
        .bind(entry.twin_id)
        .bind(entry.level)
        .bind(&entry.entry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<LoreEntry>, DomainError> {
        let rows = sqlx::query_as::<_, LoreRow>(
            "SELECT * FROM twin_lore WHERE twin_id = $1 ORDER BY created_at DESC",
        )
        .bind(twin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
