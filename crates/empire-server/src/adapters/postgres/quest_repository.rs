//! PostgreSQL implementation of QuestRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use empire::{DomainError, Quest, QuestRepository};

pub struct PgQuestRepository {
    pool: PgPool,
}

impl PgQuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuestRow {
    id: Uuid,
    twin_id: Uuid,
    quest_text: String,
    xp_reward: i32,
    completed: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<QuestRow> for Quest {
    fn from(row: QuestRow) -> Self {
        Self {
            id: row.id,
            twin_id: row.twin_id,
            quest_text: row.quest_text,
            xp_reward: row.xp_reward,
            completed: row.completed,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl QuestRepository for PgQuestRepository {
    async fn find_unexpired(
        &self,
        twin_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Quest>, DomainError> {
        let rows = sqlx::query_as::<_, QuestRow>(
            "SELECT * FROM quests WHERE twin_id = $1 AND expires_at > $2 ORDER BY created_at",
        )
        .bind(twin_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError> {
        let row = sqlx::query_as::<_, QuestRow>("SELECT * FROM quests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn insert_many(&self, quests: &[Quest]) -> Result<Vec<Quest>, DomainError> {
        let mut saved = Vec::with_capacity(quests.len());
        for quest in quests {
            let row = sqlx::query_as::<_, QuestRow>(
                r#"
                INSERT INTO quests (id, twin_id, quest_text, xp_reward, completed, expires_at, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(quest.id)
            .bind(quest.twin_id)
            .bind(&quest.quest_text)
            .bind(quest.xp_reward)
            .bind(quest.completed)
            .bind(quest.expires_at)
            .bind(quest.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;
            saved.push(row.into());
        }
        Ok(saved)
    }

    async fn mark_completed(&self, id: Uuid) -> Result<Quest, DomainError> {
        let row = sqlx::query_as::<_, QuestRow>(
            "UPDATE quests SET completed = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("Quest", id))?;

        Ok(row.into())
    }
}
