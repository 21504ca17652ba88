//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Quest models
    AssignQuestsResponse,
    CompleteQuestRequest,
    CompleteQuestResponse,
    // Relation models
    ComputeRelationResponse,
    // Twin models
    CreateTwinRequest,
    // Shard models
    EvolveShardsRequest,
    EvolveShardsResponse,
    // Lore models
    GenerateLoreRequest,
    // Leveling models
    GrantXpRequest,
    ImprintRequest,
    ImprintResponse,
    LevelUpResponse,
    LoreResponse,
    MemoryResponse,
    QuestResponse,
    RelationRequest,
    RelationResponse,
    RelationScoreBreakdown,
    // Season models
    SeasonResponse,
    SeasonRotationResponse,
    ShardResponse,
    TrainResponse,
    TwinIdRequest,
    TwinResponse,
    TwinStatsResponse,
    // Portal models
    UnlockPortalRequest,
    UnlockPortalResponse,
    VisibilityRequest,
};

use super::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Twin endpoints
        super::twins::create_twin,
        super::twins::get_twin,
        super::twins::get_twin_stats,
        super::twins::set_visibility,
        // Quest endpoints
        super::quests::assign_daily_quests,
        super::quests::complete_quest,
        super::quests::list_quests,
        // Shard endpoints
        super::shards::evolve_memory_shards,
        super::shards::list_shards,
        // Leveling endpoints
        super::leveling::evolve_twin,
        super::leveling::twin_level_up,
        // Relation endpoints
        super::relations::compute_relation,
        super::relations::list_relations,
        // Season endpoints
        super::seasons::rotate_season,
        super::seasons::current_season,
        // Portal endpoints
        super::portals::unlock_portal,
        // Lore endpoints
        super::lore::generate_lore,
        super::lore::list_lore,
        // Training endpoints
        super::training::imprint_memory,
        super::training::train_twin,
    ),
    components(schemas(
        ErrorResponse,
        CreateTwinRequest,
        TwinResponse,
        TwinStatsResponse,
        VisibilityRequest,
        TwinIdRequest,
        QuestResponse,
        AssignQuestsResponse,
        CompleteQuestRequest,
        CompleteQuestResponse,
        ShardResponse,
        EvolveShardsRequest,
        EvolveShardsResponse,
        GrantXpRequest,
        LevelUpResponse,
        RelationRequest,
        RelationResponse,
        RelationScoreBreakdown,
        ComputeRelationResponse,
        SeasonResponse,
        SeasonRotationResponse,
        UnlockPortalRequest,
        UnlockPortalResponse,
        GenerateLoreRequest,
        LoreResponse,
        ImprintRequest,
        ImprintResponse,
        MemoryResponse,
        TrainResponse,
    )),
    tags(
        (name = "Twins", description = "Twin registry and stats"),
        (name = "Quests", description = "Daily quests"),
        (name = "Shards", description = "Memory shard evolution"),
        (name = "Leveling", description = "XP grants through the two leveling policies"),
        (name = "Relations", description = "Twin-to-twin affinity"),
        (name = "Seasons", description = "Seasonal event rotation"),
        (name = "Portals", description = "Portal unlock gate"),
        (name = "Lore", description = "Generated lore fragments"),
        (name = "Training", description = "Memory imprint and personality training"),
    ),
    info(
        title = "Empire Twin API",
        version = "0.2.0",
        description = "Mirror Twin progression: leveling, shards, quests, relations, seasons, portals and lore"
    )
)]
pub struct ApiDoc;
