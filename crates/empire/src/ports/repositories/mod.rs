//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod lore_repository;
mod memory_repository;
mod portal_repository;
mod quest_repository;
mod relation_repository;
mod season_repository;
mod shard_repository;
mod twin_repository;

pub use lore_repository::*;
pub use memory_repository::*;
pub use portal_repository::*;
pub use quest_repository::*;
pub use relation_repository::*;
pub use season_repository::*;
pub use shard_repository::*;
pub use twin_repository::*;
