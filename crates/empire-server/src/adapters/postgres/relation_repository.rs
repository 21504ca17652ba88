//! PostgreSQL implementation of RelationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, RelationRepository, TwinRelation};

pub struct PgRelationRepository {
    pool: PgPool,
}

impl PgRelationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RelationRow {
    id: Uuid,
    twin_id: Uuid,
    target_twin_id: Uuid,
    relation_type: String,
    strength: i32,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<RelationRow> for TwinRelation {
    fn from(row: RelationRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            target_twin_id: row.target_twin_id,
            relation_type: row.relation_type.parse().unwrap_or_default(),
            strength: row.strength,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RelationRepository for PgRelationRepository {
    async fn upsert(&self, relation: &TwinRelation) -> Result<TwinRelation, DomainError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            INSERT INTO twin_relations (id, twin_id, target_twin_id, relation_type, strength)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (twin_id, target_twin_id)
            DO UPDATE SET relation_type = EXCLUDED.relation_type,
                          strength = EXCLUDED.strength,
                          updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(relation.id)
        .bind(relation.twin_id)
        .bind(relation.target_twin_id)
        .bind(relation.relation_type.to_string())
        .bind(relation.strength)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<TwinRelation>, DomainError> {
        let rows = sqlx::query_as::<_, RelationRow>(
            "SELECT * FROM twin_relations WHERE twin_id = $1 ORDER BY strength DESC",
        )
        .bind(twin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
