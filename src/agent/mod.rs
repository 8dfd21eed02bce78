//! Agent module - the tool-calling conversation loop.
//!
//! The loop follows the "tools in a loop" protocol:
//! 1. Send the conversation history and tool schemas to the model
//! 2. If the model answers, return the answer
//! 3. If the model requests tool calls, execute them, append the
//!    requesting turn and its results to history, and go around again
//! 4. Stop hard when the configured iteration cap is reached

mod agent_loop;
mod conversation;

pub use agent_loop::{build_messages, Agent, AgentError, ChatOutcome};
pub use conversation::Conversation;
