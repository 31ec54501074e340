//! Concrete agent implementations
//!
//! - ReactAgent: zero-shot ReAct loop over plain-text completions
//! - ToolAgent: native function-calling loop (wraps AgentExecutor)

pub mod tool;

pub use crate::react::ReactAgent;
pub use tool::ToolAgent;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Strategy an agent uses to choose tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentType {
    /// Pick tools from their descriptions using the ReAct text format
    #[default]
    ZeroShotReactDescription,
    /// Let the model call tools through the provider's function calling
    ToolCalling,
}

impl AgentType {
    /// Canonical name of the agent type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZeroShotReactDescription => "zero-shot-react-description",
            Self::ToolCalling => "tool-calling",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized agent type name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown agent type '{0}', expected zero-shot-react-description or tool-calling")]
pub struct ParseAgentTypeError(String);

impl FromStr for AgentType {
    type Err = ParseAgentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "zero-shot-react-description" | "react" => Ok(Self::ZeroShotReactDescription),
            "tool-calling" | "tools" => Ok(Self::ToolCalling),
            _ => Err(ParseAgentTypeError(s.to_string())),
        }
    }
}
