//! Empire Domain Library
//!
//! Core domain types, progression rules and interfaces for the Mirror Twin
//! companion system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Twin, MemoryShard, Quest, SeasonalEvent, ...)
//!   - `value_objects/`: Immutable value types (Alignment, Rarity, Visibility, ...)
//!   - `services/`: Pure progression rules (leveling, shard evolution, relation scoring, ...)
//!   - `tables`: Fixed progression tables (thresholds, quest pool, portals, seasons)
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (text generation)
//!
//! # Usage
//!
//! ```rust,ignore
//! use empire::domain::{Twin, MemoryShard};
//! use empire::ports::{TwinRepository, TextGenerator};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Alignment, DomainError, LoreEntry, MemoryKind, MemoryShard, PortalName, PortalUnlock, Quest,
    Rarity, RelationType, SeasonName, SeasonalEvent, StatAttribute, Twin, TwinMemory,
    TwinRelation, TwinStats, Visibility,
};
pub use ports::{
    // Text generation
    ChatMessage,
    CompletionOptions,
    CompletionResponse,
    MessageRole,
    TextGenerator,
    TokenUsage,
    // Repositories
    LoreRepository,
    MemoryRepository,
    PortalRepository,
    QuestRepository,
    RelationRepository,
    SeasonRepository,
    ShardRepository,
    TwinRepository,
};
