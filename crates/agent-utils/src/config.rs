//! Configuration management utilities

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable holding an OpenAI-compatible base URL
pub const OPENAI_API_BASE_ENV: &str = "OPENAI_API_BASE";
/// Environment variable selecting the deployment environment
pub const ENVIRONMENT_ENV: &str = "MCP_AGENT_ENV";

/// Errors raised while reading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
    /// API key for the LLM provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL override for the LLM provider
    pub api_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "mcp-agent".to_string(),
            environment: "development".to_string(),
            api_key: None,
            api_base: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            app_name: defaults.app_name,
            environment: get(ENVIRONMENT_ENV).unwrap_or(defaults.environment),
            api_key: get(OPENAI_API_KEY_ENV),
            api_base: get(OPENAI_API_BASE_ENV),
        }
    }

    /// The API key, or an error naming the variable to set
    ///
    /// A blank key counts as missing.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(OPENAI_API_KEY_ENV))
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
