//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod chat_completion;
pub mod postgres;

// Re-exports
pub use chat_completion::{ChatCompletionClient, UnconfiguredGenerator};
pub use postgres::{
    PgLoreRepository, PgMemoryRepository, PgPortalRepository, PgQuestRepository,
    PgRelationRepository, PgSeasonRepository, PgShardRepository, PgTwinRepository,
};
