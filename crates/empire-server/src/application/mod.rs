//! Application Layer (Use Cases)
//!
//! One service per handler group. Services orchestrate the pure progression
//! rules from `empire::domain::services` against the repository ports.

mod leveling;
mod lore_service;
mod portal_service;
mod prompts;
mod quest_service;
mod relation_service;
mod season_service;
mod shard_service;
mod training_service;
mod twin_service;
mod xp_grant;

#[cfg(test)]
pub(crate) mod fakes;

pub use leveling::{DirectTwinLeveling, LevelUpOutcome, LevelingPolicy, StatsLeveling};
pub use lore_service::LoreService;
pub use portal_service::{PortalDecision, PortalService};
pub use quest_service::{QuestAssignment, QuestService};
pub use relation_service::RelationService;
pub use season_service::{SeasonRotation, SeasonService};
pub use shard_service::{ShardEvolution, ShardEvolutionConfig, ShardService};
pub use training_service::TrainingService;
pub use twin_service::TwinService;
pub use xp_grant::XpGrantTask;
