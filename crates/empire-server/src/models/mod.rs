//! API request/response models

mod progression;
mod twin;
mod world;

pub use progression::*;
pub use twin::*;
pub use world::*;
