//! Chat Completion Adapter - OpenAI-compatible text generation over HTTP
//!
//! Implements the `TextGenerator` port. Upstream 429 maps to `RateLimited`,
//! 402 to `QuotaExhausted`, any other non-2xx to `ExternalService`.
//! No retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use empire::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, TextGenerator, TokenUsage,
};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// HTTP text generator
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, api_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("⚠️  Text generation returned {}", status);
            return Err(map_http_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::ExternalService(e.to_string()))?;

        parse_completion(&body, &self.model)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Used when no API key is configured. Every call fails as an upstream error.
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        Err(DomainError::ExternalService(
            "Text generation is not configured (AI_API_KEY missing)".to_string(),
        ))
    }

    fn model_id(&self) -> &str {
        "none"
    }
}

fn parse_completion(body: &str, fallback_model: &str) -> Result<CompletionResponse, DomainError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::ExternalService(format!("Malformed completion: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| DomainError::ExternalService("Completion had no content".to_string()))?;

    let usage = parsed
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        model: parsed.model.unwrap_or_else(|| fallback_model.to_string()),
        usage,
    })
}

fn map_http_error(status: StatusCode, body: &str) -> DomainError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => return DomainError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => return DomainError::QuotaExhausted,
        _ => {}
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message").or(Some(err)))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    DomainError::ExternalService(format!("Text generation failed ({}): {}", status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_quota_are_distinguished() {
        assert!(matches!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, ""),
            DomainError::RateLimited
        ));
        assert!(matches!(
            map_http_error(StatusCode::PAYMENT_REQUIRED, "{}"),
            DomainError::QuotaExhausted
        ));
    }

    #[test]
    fn test_other_status_extracts_message() {
        let body = r#"{"error": {"message": "model overloaded"}}"#;
        match map_http_error(StatusCode::SERVICE_UNAVAILABLE, body) {
            DomainError::ExternalService(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("model overloaded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_error_body() {
        match map_http_error(StatusCode::BAD_GATEWAY, "upstream down") {
            DomainError::ExternalService(msg) => assert!(msg.contains("upstream down")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Hello"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        }"#;
        let response = parse_completion(body, "fallback").unwrap();
        assert_eq!(response.content, "Hello");
        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.usage.total_tokens, 4);
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(
            parse_completion(body, "fallback"),
            Err(DomainError::ExternalService(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
            stream: false,
            max_tokens: Some(10),
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
        assert!(json.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_generator_fails() {
        let result = UnconfiguredGenerator
            .generate(&[ChatMessage::user("hi")])
            .await;
        assert!(matches!(result, Err(DomainError::ExternalService(_))));
    }
}
