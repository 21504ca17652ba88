//! PostgreSQL Repository Implementations

mod lore_repository;
mod memory_repository;
mod portal_repository;
mod quest_repository;
mod relation_repository;
mod season_repository;
mod shard_repository;
mod twin_repository;

pub use lore_repository::PgLoreRepository;
pub use memory_repository::PgMemoryRepository;
pub use portal_repository::PgPortalRepository;
pub use quest_repository::PgQuestRepository;
pub use relation_repository::PgRelationRepository;
pub use season_repository::PgSeasonRepository;
pub use shard_repository::PgShardRepository;
pub use twin_repository::PgTwinRepository;
