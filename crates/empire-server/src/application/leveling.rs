//! Twin Leveling Policies
//!
//! Two distinct strategies grant XP to a twin. They use different threshold
//! tables and persist to different places, and each call site picks one
//! explicitly:
//!
//! - [`DirectTwinLeveling`] (`/evolve-twin`): updates `twins.level/xp`,
//!   unlocks traits and asks the text generator for a new personality.
//! - [`StatsLeveling`] (`/twin-level-up`): updates the `twin_stats` row,
//!   bumps one attribute per level, mirrors level/xp onto the twin and
//!   spawns a level-up shard. Detached XP grants use this policy.
//!
//! Neither policy runs in a transaction. Two grants racing on the same twin
//! can lose one update, and two first-time grants can both insert a stats row.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use empire::domain::services::leveling::{self, LevelProgress};
use empire::domain::tables::{DIRECT_LEVEL_THRESHOLDS, STATS_LEVEL_THRESHOLDS};
use empire::{
    DomainError, MemoryShard, ShardRepository, StatAttribute, TextGenerator, TwinRepository,
};

use super::prompts;

/// Outcome of one XP grant
#[derive(Debug, Clone, Serialize)]
pub struct LevelUpOutcome {
    pub twin_id: Uuid,
    pub source: String,
    pub progress: LevelProgress,
    /// Traits appended by this grant (direct policy)
    pub new_traits: Vec<String>,
    /// Rewritten personality, if regeneration ran and succeeded (direct policy)
    pub personality: Option<String>,
    /// One attribute per gained level (stats policy)
    pub attributes_raised: Vec<StatAttribute>,
    /// Shard spawned on level-up (stats policy)
    pub shard: Option<MemoryShard>,
}

impl LevelUpOutcome {
    fn new(twin_id: Uuid, source: &str, progress: LevelProgress) -> Self {
        Self {
            twin_id,
            source: source.to_string(),
            progress,
            new_traits: Vec::new(),
            personality: None,
            attributes_raised: Vec::new(),
            shard: None,
        }
    }
}

/// Strategy for turning an XP gain into level progress
#[async_trait]
pub trait LevelingPolicy: Send + Sync {
    /// Apply `xp_gain` to the twin. Fails with NotFound if the twin is missing.
    async fn grant_xp(
        &self,
        twin_id: Uuid,
        xp_gain: i32,
        source: &str,
    ) -> Result<LevelUpOutcome, DomainError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

// ============================================
// Variant A: direct twin update
// ============================================

pub struct DirectTwinLeveling<T: TwinRepository> {
    twins: Arc<T>,
    generator: Arc<dyn TextGenerator>,
}

impl<T: TwinRepository> DirectTwinLeveling<T> {
    pub fn new(twins: Arc<T>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { twins, generator }
    }
}

#[async_trait]
impl<T: TwinRepository> LevelingPolicy for DirectTwinLeveling<T> {
    async fn grant_xp(
        &self,
        twin_id: Uuid,
        xp_gain: i32,
        source: &str,
    ) -> Result<LevelUpOutcome, DomainError> {
        let mut twin = self
            .twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))?;

        let progress = leveling::apply_xp(&DIRECT_LEVEL_THRESHOLDS, twin.level, twin.xp, xp_gain);
        let new_traits = leveling::unlock_traits(&mut twin.traits, &progress.levels_gained);

        let twin = self
            .twins
            .update_progress(twin_id, progress.level, progress.xp, &twin.traits)
            .await?;

        let mut outcome = LevelUpOutcome::new(twin_id, source, progress);
        outcome.new_traits = new_traits;

        if outcome.progress.leveled_up() {
            tracing::info!(
                "⬆️  Twin {} reached level {} (+{} xp from {})",
                twin.username,
                outcome.progress.level,
                xp_gain,
                source
            );

            // Personality rewrite is best-effort
            match self.generator.generate(&prompts::personality_rewrite(&twin)).await {
                Ok(personality) if !personality.is_empty() => {
                    match self.twins.update_personality(twin_id, &personality).await {
                        Ok(_) => outcome.personality = Some(personality),
                        Err(e) => {
                            tracing::warn!("⚠️  Failed to save personality for {}: {}", twin_id, e)
                        }
                    }
                }
                Ok(_) => tracing::warn!("⚠️  Empty personality rewrite for {}", twin_id),
                Err(e) => {
                    tracing::warn!("⚠️  Personality rewrite skipped for {}: {}", twin_id, e)
                }
            }
        }

        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "evolve-twin"
    }
}

// ============================================
// Variant B: twin_stats record
// ============================================

pub struct StatsLeveling<T: TwinRepository, S: ShardRepository> {
    twins: Arc<T>,
    shards: Arc<S>,
}

impl<T: TwinRepository, S: ShardRepository> StatsLeveling<T, S> {
    pub fn new(twins: Arc<T>, shards: Arc<S>) -> Self {
        Self { twins, shards }
    }
}

#[async_trait]
impl<T: TwinRepository, S: ShardRepository> LevelingPolicy for StatsLeveling<T, S> {
    async fn grant_xp(
        &self,
        twin_id: Uuid,
        xp_gain: i32,
        source: &str,
    ) -> Result<LevelUpOutcome, DomainError> {
        let twin = self
            .twins
            .find_by_id(twin_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Twin", twin_id))?;

        let mut stats = match self.twins.find_stats(twin_id).await? {
            Some(stats) => stats,
            None => self.twins.create_stats(twin_id).await?,
        };

        let progress = leveling::apply_xp(&STATS_LEVEL_THRESHOLDS, stats.level, stats.xp, xp_gain);

        let attributes_raised: Vec<StatAttribute> = {
            let mut rng = rand::thread_rng();
            progress
                .levels_gained
                .iter()
                .map(|_| leveling::pick_attribute(&mut rng))
                .collect()
        };
        for attribute in &attributes_raised {
            stats.increment(*attribute);
        }
        stats.level = progress.level;
        stats.xp = progress.xp;
        stats.updated_at = chrono::Utc::now();

        self.twins.save_stats(&stats).await?;
        self.twins
            .update_level_xp(twin_id, progress.level, progress.xp)
            .await?;

        let mut outcome = LevelUpOutcome::new(twin_id, source, progress);
        outcome.attributes_raised = attributes_raised;

        if outcome.progress.leveled_up() {
            let level = outcome.progress.level;
            let shard = MemoryShard::new(
                twin_id,
                "level_up",
                format!("{} ascended to level {}", twin.username, level),
                leveling::level_up_shard_rarity(level),
                0,
            );
            outcome.shard = Some(self.shards.insert(&shard).await?);

            tracing::info!(
                "⬆️  Twin {} stats reached level {} (+{} xp from {})",
                twin.username,
                level,
                xp_gain,
                source
            );
        }

        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "twin-level-up"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore, ScriptedGenerator};
    use empire::Rarity;

    #[tokio::test]
    async fn test_direct_multi_level_jump_unlocks_traits_and_rewrites() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "radiant", "wise");
        let generator = Arc::new(ScriptedGenerator::replying("A brighter self."));
        let policy = DirectTwinLeveling::new(store.clone(), generator.clone());

        let outcome = policy.grant_xp(twin.id, 260, "test").await.unwrap();

        assert_eq!(outcome.progress.level, 3);
        assert_eq!(outcome.progress.levels_gained, vec![2, 3]);
        assert_eq!(outcome.new_traits.len(), 2);
        assert_eq!(outcome.personality.as_deref(), Some("A brighter self."));

        let saved = store.twin(twin.id).unwrap();
        assert_eq!(saved.level, 3);
        assert_eq!(saved.xp, 260);
        assert_eq!(saved.traits.len(), 2);
        assert_eq!(saved.personality, "A brighter self.");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_direct_generation_failure_is_not_fatal() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let generator = Arc::new(ScriptedGenerator::failing(DomainError::RateLimited));
        let policy = DirectTwinLeveling::new(store.clone(), generator);

        let outcome = policy.grant_xp(twin.id, 100, "test").await.unwrap();

        assert!(outcome.progress.leveled_up());
        assert!(outcome.personality.is_none());
        let saved = store.twin(twin.id).unwrap();
        assert_eq!(saved.level, 2);
        assert_eq!(saved.personality, twin.personality);
    }

    #[tokio::test]
    async fn test_direct_without_level_up_skips_generation() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let policy = DirectTwinLeveling::new(store.clone(), generator.clone());

        let outcome = policy.grant_xp(twin.id, 40, "test").await.unwrap();

        assert!(!outcome.progress.leveled_up());
        assert_eq!(generator.calls(), 0);
        assert_eq!(store.twin(twin.id).unwrap().xp, 40);
    }

    #[tokio::test]
    async fn test_missing_twin_is_not_found() {
        let store = Arc::new(InMemoryStore::default());
        let generator = Arc::new(ScriptedGenerator::replying("x"));
        let direct = DirectTwinLeveling::new(store.clone(), generator);
        let stats = StatsLeveling::new(store.clone(), store.clone());

        let missing = Uuid::new_v4();
        assert!(matches!(
            direct.grant_xp(missing, 10, "test").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            stats.grant_xp(missing, 10, "test").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_stats_creates_row_and_mirrors_onto_twin() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "shadow", "fierce");
        let policy = StatsLeveling::new(store.clone(), store.clone());

        let outcome = policy.grant_xp(twin.id, 160, "test").await.unwrap();

        // 50 -> level 2, 150 -> level 3
        assert_eq!(outcome.progress.level, 3);
        assert_eq!(outcome.attributes_raised.len(), 2);

        let stats = store.stats(twin.id).unwrap();
        assert_eq!(stats.level, 3);
        assert_eq!(stats.xp, 160);
        assert_eq!(stats.attribute_total(), 2);

        let mirrored = store.twin(twin.id).unwrap();
        assert_eq!(mirrored.level, 3);
        assert_eq!(mirrored.xp, 160);

        let shard = outcome.shard.unwrap();
        assert_eq!(shard.shard_type, "level_up");
        assert_eq!(shard.rarity, Rarity::Common);
        assert_eq!(store.shards_of(twin.id).len(), 1);
    }

    #[tokio::test]
    async fn test_stats_rare_shard_from_level_five() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "radiant", "gentle");
        let policy = StatsLeveling::new(store.clone(), store.clone());

        let outcome = policy.grant_xp(twin.id, 500, "test").await.unwrap();

        assert_eq!(outcome.progress.level, 5);
        assert_eq!(outcome.shard.unwrap().rarity, Rarity::Rare);
    }

    #[tokio::test]
    async fn test_stats_accumulates_across_grants() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let policy = StatsLeveling::new(store.clone(), store.clone());

        let first = policy.grant_xp(twin.id, 30, "test").await.unwrap();
        assert!(!first.progress.leveled_up());
        assert!(first.shard.is_none());

        let second = policy.grant_xp(twin.id, 30, "test").await.unwrap();
        assert_eq!(second.progress.previous_level, 1);
        assert_eq!(second.progress.level, 2);
        assert_eq!(store.stats(twin.id).unwrap().xp, 60);
    }

    #[tokio::test]
    async fn test_stats_duplicate_rows_always_grow_the_first() {
        let store = Arc::new(InMemoryStore::default());
        let twin = seed_twin(&store, "neutral", "calm");
        let first = store.create_stats(twin.id).await.unwrap();
        let second = store.create_stats(twin.id).await.unwrap();
        let policy = StatsLeveling::new(store.clone(), store.clone());

        policy.grant_xp(twin.id, 30, "test").await.unwrap();
        policy.grant_xp(twin.id, 30, "test").await.unwrap();

        let rows = store.stats_rows_of(twin.id);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, first.id);
        assert_eq!(rows[0].xp, 60);
        assert_eq!(rows[1].id, second.id);
        assert_eq!(rows[1].xp, 0);
    }
}
