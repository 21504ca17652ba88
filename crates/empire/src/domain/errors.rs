//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Text generation rejected the request for rate reasons (HTTP 429 upstream)
    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,

    /// Text generation credits are exhausted (HTTP 402 upstream)
    #[error("Payment required, please add funds to your AI workspace.")]
    QuotaExhausted,

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("{0}")]
    Unknown(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this error came from the text-generation dependency
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::QuotaExhausted | Self::ExternalService(_)
        )
    }
}
