//! OpenRouter-backed chat completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, Completion, FinishReason, LlmClient, LlmError, ToolSchema, TokenUsage};

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// Sampling parameters are pinned (`temperature 1`, `top_p 1`); the loop
/// depends on the endpoint's format, not its randomness settings.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSchema]>,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    finish_reason: FinishReason,
    message: ChatMessage,
}

impl OpenRouterClient {
    /// Create a client for the default OpenRouter endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://openrouter.ai/api/v1".to_string())
    }

    /// Create a client pointed at a custom base URL (alternate deployments,
    /// local proxies, tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<Completion, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model,
            messages,
            tools,
            temperature: 1.0,
            top_p: 1.0,
        };

        tracing::debug!(model, message_count = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

        Ok(Completion {
            finish_reason: choice.finish_reason,
            message: choice.message,
            usage: parsed.usage.unwrap_or_default(),
        })
    }
}
