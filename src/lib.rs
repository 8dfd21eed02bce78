//! # codechat-agent
//!
//! A tool-calling conversation loop for OpenAI-compatible chat completion
//! endpoints.
//!
//! This library provides:
//! - A bounded orchestration loop that lets the remote model request local
//!   tool execution and feed on the results until it produces an answer
//! - A name-keyed tool registry with schema-validated arguments
//! - An OpenRouter completion client behind a swappable trait
//!
//! ## Architecture
//!
//! The loop follows the "tools in a loop" protocol:
//! 1. Send the conversation history and tool schemas to the model
//! 2. If the model requests tool calls, execute them and append the
//!    requesting turn plus its results to history
//! 3. Repeat until the model answers, fails, or the iteration cap fires
//!
//! Tool-side failures (unknown tool, bad arguments, handler errors) are fed
//! back to the model as tool-result content so it can self-correct; only
//! configuration, transport, and cap-exceeded failures terminate a run.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codechat_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config);
//! let outcome = agent.run("What's in the data directory?").await?;
//! println!("{}", outcome.text);
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
