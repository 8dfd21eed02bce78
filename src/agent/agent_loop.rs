//! Core conversation loop implementation.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::llm::{
    ChatMessage, FinishReason, LlmClient, LlmError, OpenRouterClient, TokenUsage, ToolSchema,
};
use crate::tools::{CheckFileStatus, ToolRegistry};

use super::conversation::Conversation;

/// Terminal failure of one loop run.
///
/// Tool-side problems never show up here; those are folded into the
/// conversation as tool-result content so the model can react to them.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model reported finish_reason=error")]
    Provider,

    #[error("model returned an empty turn")]
    EmptyTurn,

    #[error("iteration limit of {limit} reached without a final answer")]
    LimitExceeded { limit: usize },
}

/// Successful result of one loop run.
#[derive(Debug)]
pub struct ChatOutcome {
    /// Final answer text. Partial when `truncated` is set.
    pub text: String,

    /// The turn ended with `finish_reason=length`: the text is whatever
    /// arrived before the token limit, not a complete answer. Not retried.
    pub truncated: bool,

    /// Token usage summed over every request/response cycle
    pub usage: TokenUsage,

    /// Full message history of the exchange, for external persistence
    pub history: Vec<ChatMessage>,
}

/// Build the outbound message list: the history so far plus an optional new
/// user turn. Pure with respect to `history`: the loop records the user
/// turn in its own accumulator only once the cycle it was sent in succeeds.
pub fn build_messages(history: &Conversation, new_user_text: Option<&str>) -> Vec<ChatMessage> {
    let mut messages = history.messages().to_vec();
    if let Some(text) = new_user_text {
        messages.push(ChatMessage::user(text));
    }
    messages
}

/// The conversation orchestrator.
///
/// Owns the tool registry and the completion client, and drives the
/// request → response → (tool execution) → request cycle until the model
/// answers, something terminal fails, or the iteration cap fires.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent with the builtin tool set and an OpenRouter client.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OpenRouterClient::with_base_url(
            config.api_key.clone(),
            config.base_url.clone(),
        ));

        let mut tools = ToolRegistry::new();
        tools
            .register(Arc::new(CheckFileStatus))
            .expect("builtin tool names are unique");

        Self { config, llm, tools }
    }

    /// Create an agent with a custom client and tool set.
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one question through a fresh conversation.
    pub async fn run(&self, question: &str) -> Result<ChatOutcome, AgentError> {
        self.run_with_history(Conversation::new(), question).await
    }

    /// Run one question, resuming from prior turns.
    ///
    /// Each cycle sends the accumulated history plus the tool schemas,
    /// classifies the response, and either returns, fails, or executes the
    /// requested tools and goes around again. The iteration cap is a hard
    /// stop: the remote side decides whether to keep requesting tools, so
    /// nothing else bounds the loop.
    pub async fn run_with_history(
        &self,
        mut conversation: Conversation,
        question: &str,
    ) -> Result<ChatOutcome, AgentError> {
        let schemas = self.tools.schemas();
        let tool_schemas: Option<&[ToolSchema]> = if schemas.is_empty() {
            None
        } else {
            Some(&schemas)
        };

        let mut usage = TokenUsage::default();
        let mut pending_user = Some(question.to_string());

        for iteration in 0..self.config.max_iterations {
            tracing::debug!(iteration = iteration + 1, "Starting request cycle");

            let outbound = build_messages(&conversation, pending_user.as_deref());
            let completion = self
                .llm
                .chat_completion(&self.config.model, &outbound, tool_schemas)
                .await?;
            usage.add(completion.usage);

            // The cycle succeeded; the user turn it carried becomes history.
            if let Some(text) = pending_user.take() {
                conversation.push_user(text);
            }

            match completion.finish_reason {
                FinishReason::ToolCalls => {
                    let calls = completion.message.tool_calls.clone().unwrap_or_default();
                    if calls.is_empty() {
                        return Err(AgentError::EmptyTurn);
                    }

                    tracing::debug!(count = calls.len(), "Model requested tool calls");

                    // Requesting message first, then its results.
                    conversation.push_assistant(completion.message);
                    let results = self.tools.execute_calls(&calls).await;
                    conversation.push_tool_results(results);
                }
                FinishReason::Stop => {
                    let text = completion
                        .message
                        .content
                        .clone()
                        .ok_or(AgentError::EmptyTurn)?;
                    conversation.push_assistant(completion.message);
                    return Ok(ChatOutcome {
                        text,
                        truncated: false,
                        usage,
                        history: conversation.into_messages(),
                    });
                }
                FinishReason::Length => {
                    tracing::warn!("Turn truncated by token limit; surfacing partial answer");
                    let text = completion.message.content.clone().unwrap_or_default();
                    conversation.push_assistant(completion.message);
                    return Ok(ChatOutcome {
                        text,
                        truncated: true,
                        usage,
                        history: conversation.into_messages(),
                    });
                }
                FinishReason::Error | FinishReason::Other => {
                    return Err(AgentError::Provider);
                }
            }
        }

        Err(AgentError::LimitExceeded {
            limit: self.config.max_iterations,
        })
    }
}
