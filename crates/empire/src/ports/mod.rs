//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (the relational store, text generation).
//!
//! Implementations of these traits live in the infrastructure layer.
//! None of the repository operations are transactional; a handler's
//! read-then-write sequence runs without isolation.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
