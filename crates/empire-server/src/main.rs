use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use anyhow::Context;
use empire::TextGenerator;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
mod scheduler;

use adapters::{
    ChatCompletionClient, PgLoreRepository, PgMemoryRepository, PgPortalRepository,
    PgQuestRepository, PgRelationRepository, PgSeasonRepository, PgShardRepository,
    PgTwinRepository, UnconfiguredGenerator,
};
use application::{
    DirectTwinLeveling, LevelingPolicy, LoreService, PortalService, QuestService,
    RelationService, SeasonService, ShardService, StatsLeveling, TrainingService, TwinService,
};
use config::AppConfig;

/// Type aliases for application services with concrete repository implementations
pub type AppTwinService = TwinService<PgTwinRepository>;
pub type AppQuestService = QuestService<PgQuestRepository>;
pub type AppShardService = ShardService<PgShardRepository, PgTwinRepository>;
pub type AppRelationService = RelationService<PgTwinRepository, PgRelationRepository>;
pub type AppSeasonService = SeasonService<PgSeasonRepository, PgTwinRepository, PgShardRepository>;
pub type AppPortalService = PortalService<PgPortalRepository, PgTwinRepository, PgSeasonRepository>;
pub type AppLoreService = LoreService<PgLoreRepository, PgTwinRepository>;
pub type AppTrainingService = TrainingService<PgMemoryRepository, PgTwinRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub twin_service: Arc<AppTwinService>,
    pub quest_service: Arc<AppQuestService>,
    pub shard_service: Arc<AppShardService>,
    /// Direct table policy behind `/evolve-twin`
    pub evolve_twin: Arc<dyn LevelingPolicy>,
    /// Stats table policy behind `/twin-level-up` and every detached grant
    pub twin_level_up: Arc<dyn LevelingPolicy>,
    pub relation_service: Arc<AppRelationService>,
    pub season_service: Arc<AppSeasonService>,
    pub portal_service: Arc<AppPortalService>,
    pub lore_service: Arc<AppLoreService>,
    pub training_service: Arc<AppTrainingService>,
}

impl AppState {
    /// Wire every service over one pool
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let generator: Arc<dyn TextGenerator> = match config.ai_api_key.clone() {
            Some(api_key) => {
                let client =
                    ChatCompletionClient::new(api_key, config.ai_api_url.clone(), config.ai_model.clone());
                tracing::info!("🪞 Text generation enabled ({})", client.model_id());
                Arc::new(client)
            }
            None => {
                tracing::warn!("⚠️  No AI_API_KEY set - personality, lore and training disabled");
                Arc::new(UnconfiguredGenerator)
            }
        };

        let twins = Arc::new(PgTwinRepository::new(pool.clone()));
        let shards = Arc::new(PgShardRepository::new(pool.clone()));
        let quests = Arc::new(PgQuestRepository::new(pool.clone()));
        let relations = Arc::new(PgRelationRepository::new(pool.clone()));
        let seasons = Arc::new(PgSeasonRepository::new(pool.clone()));
        let lore = Arc::new(PgLoreRepository::new(pool.clone()));
        let portals = Arc::new(PgPortalRepository::new(pool.clone()));
        let memories = Arc::new(PgMemoryRepository::new(pool.clone()));

        let evolve_twin: Arc<dyn LevelingPolicy> =
            Arc::new(DirectTwinLeveling::new(twins.clone(), generator.clone()));
        let twin_level_up: Arc<dyn LevelingPolicy> =
            Arc::new(StatsLeveling::new(twins.clone(), shards.clone()));

        Self {
            pool,
            twin_service: Arc::new(TwinService::new(twins.clone())),
            quest_service: Arc::new(QuestService::new(quests, twin_level_up.clone())),
            shard_service: Arc::new(ShardService::new(
                shards.clone(),
                twins.clone(),
                config.shard_evolution,
            )),
            evolve_twin,
            relation_service: Arc::new(RelationService::new(twins.clone(), relations)),
            season_service: Arc::new(SeasonService::new(
                seasons.clone(),
                twins.clone(),
                shards,
            )),
            portal_service: Arc::new(PortalService::new(portals, twins.clone(), seasons)),
            lore_service: Arc::new(LoreService::new(lore, twins.clone(), generator.clone())),
            training_service: Arc::new(TrainingService::new(
                memories,
                twins,
                generator,
                twin_level_up.clone(),
            )),
            twin_level_up,
        }
    }
}

// Allow extracting PgPool directly from AppState
impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> PgPool {
        state.pool.clone()
    }
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🏰 Empire API initializing...");

    let config = AppConfig::from_secrets(&secrets);

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    let interval_secs = config.season_rotation_interval_secs;
    let state = AppState::new(pool, config);

    if let Some(_handle) = scheduler::maybe_start_scheduler(state.season_service.clone(), interval_secs)
    {
        tracing::info!("📅 Season scheduler started");
    } else {
        tracing::warn!("⚠️  Season scheduler disabled (no SEASON_ROTATION_INTERVAL_SECS)");
    }

    let router = routes::build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Empire API ready - the mirror is listening");

    Ok(router.into())
}
