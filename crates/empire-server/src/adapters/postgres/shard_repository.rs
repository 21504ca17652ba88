//! PostgreSQL implementation of ShardRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, MemoryShard, ShardRepository};

pub struct PgShardRepository {
    pool: PgPool,
}

impl PgShardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShardRow {
    id: Uuid,
    twin_id: Uuid,
    shard_type: String,
    value: String,
    rarity: String,
    xp: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ShardRow> for MemoryShard {
    fn from(row: ShardRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            shard_type: row.shard_type,
            value: row.value,
            rarity: row.rarity.parse().unwrap_or_default(),
            xp: row.xp,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const INSERT_SHARD: &str = r#"
    INSERT INTO memory_shards (id, twin_id, shard_type, value, rarity, xp)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING *
"#;

#[async_trait]
impl ShardRepository for PgShardRepository {
    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<MemoryShard>, DomainError> {
        let rows = sqlx::query_as::<_, ShardRow>(
            "SELECT * FROM memory_shards WHERE twin_id = $1 ORDER BY created_at",
        )
        .bind(twin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError> {
        let row = sqlx::query_as::<_, ShardRow>(INSERT_SHARD)
            .bind(shard.id)
            .bind(shard.twin_id)
            .bind(&shard.shard_type)
            .bind(&shard.value)
            .bind(shard.rarity.to_string())
            .bind(shard.xp)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn insert_many(&self, shards: &[MemoryShard]) -> Result<usize, DomainError> {
        // One statement per shard; a failure part way leaves earlier inserts in place
        for shard in shards {
            self.insert(shard).await?;
        }
        Ok(shards.len())
    }

    async fn update(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError> {
        let row = sqlx::query_as::<_, ShardRow>(
            r#"
            UPDATE memory_shards
            SET xp = $2, rarity = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(shard.id)
        .bind(shard.xp)
        .bind(shard.rarity.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("MemoryShard", shard.id))?;

        Ok(row.into())
    }
}
