//! PostgreSQL implementation of MemoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, MemoryRepository, TwinMemory};

pub struct PgMemoryRepository {
    pool: PgPool,
}

impl PgMemoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MemoryRow {
    id: Uuid,
    twin_id: Uuid,
    content: String,
    kind: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<MemoryRow> for TwinMemory {
    fn from(row: MemoryRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            content: row.content,
            kind: row.kind.parse().unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MemoryRepository for PgMemoryRepository {
    async fn add(&self, memory: &TwinMemory) -> Result<TwinMemory, DomainError> {
        let row = sqlx::query_as::<_, MemoryRow>(
            "INSERT INTO twin_memories (id, twin_id, content, kind) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(memory.id)
        .bind(memory.twin_id)
        .bind(&memory.content)
        .bind(memory.kind.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn recent(&self, twin_id: Uuid, limit: i64) -> Result<Vec<TwinMemory>, DomainError> {
        let rows = sqlx::query_as::<_, MemoryRow>(
            "SELECT * FROM twin_memories WHERE twin_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(twin_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
