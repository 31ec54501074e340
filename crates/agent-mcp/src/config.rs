//! Configuration types for MCP tool servers
//!
//! Lists the servers an agent connects to and the tool each one becomes.
//!
//! # Example
//!
//! ```json
//! {
//!   "servers": [
//!     {
//!       "server": "web_search_server",
//!       "tool": "WebSearch",
//!       "description": "Search the web for information and recent facts"
//!     },
//!     { "server": "calendar_server" }
//!   ]
//! }
//! ```

use crate::client::{ArcMCPClient, EchoMCPClient};
use crate::error::MCPError;
use crate::tool::MCPToolAdapter;
use agent_tools::Tool;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Root MCP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCPConfig {
    /// Servers in the order their tools are offered to the agent
    #[serde(default)]
    pub servers: Vec<MCPServerConfig>,
}

/// One tool server and the tool it is exposed as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCPServerConfig {
    /// Server name used to open the connection
    pub server: String,

    /// Tool name shown to the agent (defaults to the server name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Tool description shown to the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MCPServerConfig {
    /// Create a server entry with an explicit tool name and description
    pub fn new(
        server: impl Into<String>,
        tool: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            tool: Some(tool.into()),
            description: Some(description.into()),
        }
    }

    /// Tool name this entry resolves to
    pub fn tool_name(&self) -> &str {
        self.tool.as_deref().unwrap_or(&self.server)
    }
}

impl Default for MCPConfig {
    /// The web search, story writer and image generator servers
    fn default() -> Self {
        Self {
            servers: vec![
                MCPServerConfig::new(
                    "web_search_server",
                    "WebSearch",
                    "Search the web for information and recent facts",
                ),
                MCPServerConfig::new(
                    "story_writer_server",
                    "StoryWriter",
                    "Write creative stories on any topic",
                ),
                MCPServerConfig::new(
                    "image_generator_server",
                    "ImageGenerator",
                    "Create images based on descriptions",
                ),
            ],
        }
    }
}

impl MCPConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MCPError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MCPError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;

        let config: MCPConfig = serde_json::from_str(&content).map_err(|e| {
            MCPError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that every server and tool name is usable and unique
    pub fn validate(&self) -> Result<(), MCPError> {
        let mut seen = HashSet::new();
        for entry in &self.servers {
            if entry.server.trim().is_empty() {
                return Err(MCPError::ConfigError("Server name is empty".to_string()));
            }
            let tool = entry.tool_name();
            if tool.trim().is_empty() {
                return Err(MCPError::ConfigError(format!(
                    "Tool name for server '{}' is empty",
                    entry.server
                )));
            }
            if !seen.insert(tool) {
                return Err(MCPError::ConfigError(format!(
                    "Duplicate tool name '{tool}'"
                )));
            }
        }
        Ok(())
    }

    /// Connect every server with `EchoMCPClient` and adapt it into a tool
    pub fn build_tools(&self) -> Result<Vec<Arc<dyn Tool>>, MCPError> {
        self.build_tools_with(|server| Arc::new(EchoMCPClient::new(server)))
    }

    /// Adapt every server into a tool using clients from `connect`
    ///
    /// Tools come back in configuration order.
    pub fn build_tools_with(
        &self,
        connect: impl Fn(&str) -> ArcMCPClient,
    ) -> Result<Vec<Arc<dyn Tool>>, MCPError> {
        self.validate()?;

        let tools: Vec<Arc<dyn Tool>> = self
            .servers
            .iter()
            .map(|entry| {
                let adapter = MCPToolAdapter::new(
                    connect(&entry.server),
                    entry.tool.clone(),
                    entry.description.clone(),
                );
                Arc::new(adapter) as Arc<dyn Tool>
            })
            .collect();

        info!(tool_count = tools.len(), "Adapted MCP servers into tools");
        Ok(tools)
    }
}
