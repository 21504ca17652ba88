//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Twin: AI companion with level/xp/traits, plus its TwinStats record
//! - MemoryShard: rarity-tiered memory unit
//! - TwinRelation: directed ally/rival/neutral edge
//! - Quest, SeasonalEvent, LoreEntry, PortalUnlock, TwinMemory

mod lore;
mod memory;
mod portal;
mod quest;
mod relation;
mod season;
mod shard;
mod twin;

pub use lore::*;
pub use memory::*;
pub use portal::*;
pub use quest::*;
pub use relation::*;
pub use season::*;
pub use shard::*;
pub use twin::*;
