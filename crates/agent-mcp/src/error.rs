//! Error types for MCP operations

use thiserror::Error;

/// Errors that can occur during MCP operations
#[derive(Error, Debug)]
pub enum MCPError {
    /// A query sent to a tool server failed
    #[error("Query to MCP server '{server}' failed: {message}")]
    QueryFailed {
        /// Server the query was sent to
        server: String,
        /// What went wrong
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convert MCPError to agent_core::Error
impl From<MCPError> for agent_core::Error {
    fn from(err: MCPError) -> Self {
        match err {
            MCPError::ConfigError(msg) => agent_core::Error::ConfigError(msg),
            other => agent_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}
