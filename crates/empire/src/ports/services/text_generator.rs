//! Text Generator Port
//!
//! Abstract interface for the external chat-completion service that writes
//! personalities, lore and training reflections. Implementations map
//! upstream 429 to `DomainError::RateLimited` and 402 to
//! `DomainError::QuotaExhausted`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Options for a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(512),
            temperature: Some(0.8),
        }
    }
}

/// Response from a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Text generation interface
///
/// # Example
///
/// ```rust,ignore
/// use empire::ports::{ChatMessage, TextGenerator};
///
/// let reply = generator
///     .generate(&[ChatMessage::system(SYSTEM), ChatMessage::user(prompt)])
///     .await?;
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// Generate with default options and return only the trimmed text
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let response = self
            .complete(messages, &CompletionOptions::default())
            .await?;
        Ok(response.content.trim().to_string())
    }

    /// Model identifier used for requests
    fn model_id(&self) -> &str;
}
