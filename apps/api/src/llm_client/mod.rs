/// LLM client — the single point of entry for all Groq API calls.
///
/// ARCHITECTURAL RULE: No other module may call the completions API directly.
/// Handlers and the assistant depend on the `CompletionClient` trait, so tests
/// substitute a recording mock without touching any call site.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::ConversationTurn;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default model (8K context window). Override with GROQ_MODEL.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
/// Low temperature biases toward consistent, factual answers about the résumé.
const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GROQ_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Completion returned empty content")]
    EmptyContent,
}

/// The injected completion capability: one chat-completion request built from
/// system instructions, prior turns in order, then the new user message.
/// Returns the generated text verbatim.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// Groq-backed `CompletionClient` (OpenAI-compatible wire format).
/// Retries 429 and 5xx with exponential backoff; auth and client errors are
/// returned immediately.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, LlmError> {
        // Fail fast before any network I/O when the key was never configured.
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: system,
        });
        for turn in history {
            messages.push(WireMessage {
                role: turn.role.as_str(),
                content: &turn.content,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: message,
        });

        let request_body = ChatCompletionRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Completion attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(GROQ_API_URL)
                .bearer_auth(api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Completions API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<GroqError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion: ChatCompletionResponse = response.json().await?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return completion
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|text| !text.is_empty())
                .ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let client = GroqClient::new(None, DEFAULT_MODEL.to_string());
        let result = client.complete("system", &[], "hello").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_request_serializes_roles_in_order() {
        let history = vec![
            ConversationTurn::user("first question"),
            ConversationTurn::assistant("first answer"),
        ];
        let mut messages = vec![WireMessage {
            role: "system",
            content: "instructions",
        }];
        for turn in &history {
            messages.push(WireMessage {
                role: turn.role.as_str(),
                content: &turn.content,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: "second question",
        });

        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages,
        };
        let value = serde_json::to_value(&request).unwrap();
        let roles: Vec<&str> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
        assert_eq!(value["model"], DEFAULT_MODEL);
        assert!((value["temperature"].as_f64().unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_content_extraction() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(text, "Hi there");
    }
}
