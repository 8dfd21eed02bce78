//! LLM client abstraction and chat completion wire types.
//!
//! The types here mirror the OpenAI chat completion format that OpenRouter
//! speaks: a `messages` array of role-tagged turns, an optional `tools`
//! array of function schemas, and a response whose `finish_reason` tells
//! the caller whether the model answered, asked for tools, or ran out of
//! room.

mod openrouter;

pub use openrouter::OpenRouterClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single conversation turn, in wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool invocations requested by an assistant turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// For `tool` turns: the id of the call this message answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// For `tool` turns: the name of the tool that produced the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// A tool-result turn answering the call with the given id.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            name: Some(name.into()),
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique within the turn that requested it
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub function: FunctionCall,
}

/// The function half of a tool call: which tool, and its raw arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    /// JSON-serialized argument object. Arrives as a string, not parsed JSON.
    pub arguments: String,
}

/// Schema advertisement for one tool, sent in the request `tools` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: String,

    pub function: FunctionSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema object describing the parameters
    pub parameters: serde_json::Value,
}

/// Why the model ended its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Model produced a final answer
    Stop,
    /// Model requested tool execution
    ToolCalls,
    /// Output hit the token limit; the answer is incomplete
    Length,
    /// Provider-reported failure
    Error,
    /// Anything this client does not recognize
    #[serde(other)]
    Other,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Fold another cycle's usage into this running total.
    pub fn add(&mut self, other: TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// One completed turn from the endpoint: the first choice plus usage.
#[derive(Debug, Clone)]
pub struct Completion {
    pub finish_reason: FinishReason,
    pub message: ChatMessage,
    pub usage: TokenUsage,
}

/// Errors from the completion client. All of these are terminal for the
/// conversation that hit them; tool-level failures never surface here.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion response contained no choices")]
    EmptyResponse,
}

/// A chat completion backend.
///
/// One network round-trip per call: send history plus tool schemas, get back
/// the model's next turn. Implementations must not retry tool-call turns on
/// their own; the agent loop owns that decision.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<Completion, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_message_skips_absent_fields() {
        let msg = ChatMessage::user("hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn tool_result_carries_call_id_and_name() {
        let msg = ChatMessage::tool_result("call_1", "check_file_status", "{}");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert_eq!(value["name"], "check_file_status");
    }

    #[test]
    fn finish_reason_parses_wire_values() {
        let parse = |s: &str| serde_json::from_value::<FinishReason>(json!(s)).unwrap();
        assert_eq!(parse("stop"), FinishReason::Stop);
        assert_eq!(parse("tool_calls"), FinishReason::ToolCalls);
        assert_eq!(parse("length"), FinishReason::Length);
        assert_eq!(parse("error"), FinishReason::Error);
        assert_eq!(parse("content_filter"), FinishReason::Other);
    }

    #[test]
    fn assistant_tool_call_round_trips() {
        let raw = json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_abc",
                "type": "function",
                "function": {
                    "name": "check_file_status",
                    "arguments": "{\"file_path\":\"/tmp\"}"
                }
            }]
        });
        let msg: ChatMessage = serde_json::from_value(raw).unwrap();
        let calls = msg.tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "check_file_status");
    }
}
