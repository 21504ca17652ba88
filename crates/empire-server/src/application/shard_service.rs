//! Shard Application Service
//!
//! Evolves every shard of a twin after an activity and may spawn a new one.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use empire::domain::services::shard_evolution;
use empire::domain::tables::SHARD_SPAWN_PROBABILITY;
use empire::{DomainError, MemoryShard, ShardRepository, TwinRepository};

/// Shard evolution tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ShardEvolutionConfig {
    /// Chance of spawning a new common shard per evolution (0.0 - 1.0)
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f64,
}

fn default_spawn_probability() -> f64 {
    SHARD_SPAWN_PROBABILITY
}

impl Default for ShardEvolutionConfig {
    fn default() -> Self {
        Self {
            spawn_probability: default_spawn_probability(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShardEvolution {
    pub xp_gained: i32,
    pub shards: Vec<MemoryShard>,
    /// Shards whose rarity changed in this pass
    pub promoted: usize,
    pub spawned: Option<MemoryShard>,
}

pub struct ShardService<S: ShardRepository, T: TwinRepository> {
    shards: Arc<S>,
    twins: Arc<T>,
    config: ShardEvolutionConfig,
}

impl<S: ShardRepository, T: TwinRepository> ShardService<S, T> {
    pub fn new(shards: Arc<S>, twins: Arc<T>, config: ShardEvolutionConfig) -> Self {
        Self {
            shards,
            twins,
            config,
        }
    }

    pub async fn evolve(&self, twin_id: Uuid, context: &str) -> Result<ShardEvolution, DomainError> {
        if self.twins.find_by_id(twin_id).await?.is_none() {
            return Err(DomainError::not_found("Twin", twin_id));
        }

        let xp_gained = shard_evolution::xp_gain_for_context(context);
        let mut shards = self.shards.find_by_twin(twin_id).await?;
        let mut promoted = 0;

        for shard in shards.iter_mut() {
            if shard_evolution::evolve_shard(shard, xp_gained) {
                promoted += 1;
                tracing::info!("💎 Shard {} promoted to {}", shard.id, shard.rarity);
            }
            *shard = self.shards.update(shard).await?;
        }

        let candidate = {
            let mut rng = rand::thread_rng();
            shard_evolution::maybe_spawn(&mut rng, twin_id, self.config.spawn_probability, context)
        };
        let spawned = match candidate {
            Some(shard) => {
                let saved = self.shards.insert(&shard).await?;
                tracing::info!("✨ New {} shard spawned for twin {}", saved.shard_type, twin_id);
                Some(saved)
            }
            None => None,
        };

        Ok(ShardEvolution {
            xp_gained,
            shards,
            promoted,
            spawned,
        })
    }

    pub async fn list(&self, twin_id: Uuid) -> Result<Vec<MemoryShard>, DomainError> {
        self.shards.find_by_twin(twin_id).await
    }
}
