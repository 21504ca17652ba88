//! Domain Services
//!
//! Pure progression rules. Randomness is passed in as `&mut impl Rng` so the
//! rules stay deterministic under a seeded generator.

pub mod leveling;
pub mod portal_gate;
pub mod quest_assignment;
pub mod relation_scoring;
pub mod season_rotation;
pub mod shard_evolution;

pub use leveling::LevelProgress;
pub use portal_gate::GateDenial;
pub use relation_scoring::RelationScore;
