//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod alignment;
mod memory_kind;
mod portal_name;
mod rarity;
mod relation_type;
mod season_name;
mod stat_attribute;
mod visibility;

pub use alignment::*;
pub use memory_kind::*;
pub use portal_name::*;
pub use rarity::*;
pub use relation_type::*;
pub use season_name::*;
pub use stat_attribute::*;
pub use visibility::*;
