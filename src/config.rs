//! Configuration management.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. Bearer token for the completion endpoint.
//! - `DEFAULT_MODEL` - Optional. Model identifier. Defaults to `openai/gpt-4o-2024-08-06`.
//! - `OPENROUTER_BASE_URL` - Optional. Completion endpoint base URL. Defaults to
//!   `https://openrouter.ai/api/v1`.
//! - `MAX_ITERATIONS` - Optional. Maximum request/response cycles per conversation.
//!   Defaults to `10`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Orchestration loop configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the completion endpoint
    pub api_key: String,

    /// Model identifier (OpenRouter format)
    pub model: String,

    /// Base URL of the OpenAI-compatible completion endpoint
    pub base_url: String,

    /// Maximum request/response cycles before the loop gives up.
    /// The remote service decides whether to keep requesting tools, so this
    /// cap is the only thing bounding the conversation.
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| "openai/gpt-4o-2024-08-06".to_string());

        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            model,
            base_url,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            max_iterations: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = Config::new("key".to_string(), "openai/gpt-4o-2024-08-06".to_string());
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
    }
}
