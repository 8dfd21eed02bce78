//! Tool definitions, registry, and the per-turn executor.
//!
//! The model requests tools by name with JSON arguments; everything that
//! can go wrong on the tool side (unknown name, bad arguments, handler
//! failure) is absorbed into the tool's result content so the model can
//! read the error and adjust. Only transport-level failures escape the
//! conversation.

mod file_status;
pub mod schema;

pub use file_status::CheckFileStatus;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::{ChatMessage, FunctionSchema, ToolCall, ToolSchema};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("no tool named '{0}' is registered")]
    UnknownTool(String),

    #[error("invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("tool '{tool}' failed: {message}")]
    Execution { tool: String, message: String },
}

impl ToolError {
    /// Stable identifier embedded in error result content.
    fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::Execution { .. } => "execution_error",
        }
    }
}

/// A locally executable function the model may request by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, as advertised to the model.
    fn name(&self) -> &str;

    /// One-line description for the tool schema.
    fn description(&self) -> &str;

    /// JSON Schema object describing the parameters.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. `args` has already been parsed and validated against
    /// `parameters_schema`. The returned value is serialized into the
    /// tool-result message.
    async fn execute(&self, args: Value) -> anyhow::Result<Value>;
}

/// Name-keyed collection of tools for one conversation.
///
/// Registration happens up front; during a conversation the registry is
/// only read, so it can be shared by reference without locking.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Fails if a tool with the same name already exists.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool schemas in the request wire format, sorted by name so the
    /// advertised list is stable across runs.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                kind: "function".to_string(),
                function: FunctionSchema {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters_schema(),
                },
            })
            .collect();
        schemas.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        schemas
    }

    /// Execute every tool call from one assistant turn and return the
    /// tool-result messages in the order the calls were requested.
    ///
    /// Calls run concurrently; `join_all` re-joins results in input order,
    /// so history ordering never depends on completion timing. A call id
    /// repeated within the turn is executed once and later occurrences are
    /// dropped, keeping results one-to-one with ids.
    pub async fn execute_calls(&self, calls: &[ToolCall]) -> Vec<ChatMessage> {
        let mut seen = HashSet::new();
        let unique: Vec<&ToolCall> = calls
            .iter()
            .filter(|call| {
                if seen.insert(call.id.as_str()) {
                    true
                } else {
                    tracing::warn!(id = %call.id, "Dropping duplicate tool call id in turn");
                    false
                }
            })
            .collect();

        let results = futures::future::join_all(
            unique.iter().map(|call| self.execute_call(call)),
        )
        .await;

        unique
            .iter()
            .zip(results)
            .map(|(call, result)| {
                let content = match result {
                    Ok(value) => value.to_string(),
                    Err(err) => {
                        tracing::warn!(
                            tool = %call.function.name,
                            error = %err,
                            "Tool call failed; feeding error back to model"
                        );
                        json!({"error": err.to_string(), "kind": err.kind()}).to_string()
                    }
                };
                ChatMessage::tool_result(&call.id, &call.function.name, content)
            })
            .collect()
    }

    /// Parse, validate, and run a single call.
    async fn execute_call(&self, call: &ToolCall) -> Result<Value, ToolError> {
        let name = &call.function.name;
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.clone()))?;

        let args: Value = serde_json::from_str(&call.function.arguments).map_err(|e| {
            ToolError::InvalidArguments {
                tool: name.clone(),
                reason: format!("arguments are not valid JSON: {}", e),
            }
        })?;

        schema::validate(&args, &tool.parameters_schema()).map_err(|reason| {
            ToolError::InvalidArguments {
                tool: name.clone(),
                reason,
            }
        })?;

        tracing::debug!(tool = %name, args = %args, "Executing tool call");

        tool.execute(args).await.map_err(|e| ToolError::Execution {
            tool: name.clone(),
            message: format!("{:#}", e),
        })
    }
}
