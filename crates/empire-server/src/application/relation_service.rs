//! Relation Application Service

use std::sync::Arc;

use uuid::Uuid;

use empire::domain::services::relation_scoring::{self, RelationScore};
use empire::{DomainError, RelationRepository, TwinRelation, TwinRepository};

pub struct RelationService<T: TwinRepository, R: RelationRepository> {
    twins: Arc<T>,
    relations: Arc<R>,
}

impl<T: TwinRepository, R: RelationRepository> RelationService<T, R> {
    pub fn new(twins: Arc<T>, relations: Arc<R>) -> Self {
        Self { twins, relations }
    }

    /// Score `twin -> target` and upsert the directed edge. The reverse edge is untouched.
    pub async fn compute(
        &self,
        twin_id: Uuid,
        target_twin_id: Uuid,
    ) -> Result<(TwinRelation, RelationScore), DomainError> {
        let twin = self
            .twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))?;
        let target = self
            .twins
            .find_by_id(target_twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", target_twin_id))?;

        let score = relation_scoring::score(&twin, &target);
        let relation = TwinRelation::new(
            twin_id,
            target_twin_id,
            score.relation_type,
            score.strength_points(),
        );
        let relation = self.relations.upsert(&relation).await?;

        tracing::info!(
            "🔗 {} -> {}: {} ({})",
            twin.username,
            target.username,
            relation.relation_type,
            relation.strength
        );

        Ok((relation, score))
    }

    pub async fn list(&self, twin_id: Uuid) -> Result<Vec<TwinRelation>, DomainError> {
        self.relations.find_by_twin(twin_id).await
    }
}
