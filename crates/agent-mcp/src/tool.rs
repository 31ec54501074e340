//! Adapter that exposes an MCP client as an agent tool

use agent_tools::{Tool, schema, tool_input_text};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::client::ArcMCPClient;

/// Wrapper that implements `agent_tools::Tool` for an MCP client
///
/// The tool forwards its text input to the client verbatim and returns the
/// client's reply as a JSON string.
pub struct MCPToolAdapter {
    client: ArcMCPClient,
    name: String,
    description: String,
}

impl MCPToolAdapter {
    /// Create a new adapter
    ///
    /// `name` defaults to the client's server name and `description` to
    /// `Use this tool to access {name} functionality`.
    pub fn new(client: ArcMCPClient, name: Option<String>, description: Option<String>) -> Self {
        let name = name.unwrap_or_else(|| client.server_name().to_string());
        let description =
            description.unwrap_or_else(|| format!("Use this tool to access {name} functionality"));

        Self {
            client,
            name,
            description,
        }
    }

    /// Adapter using the client's server name and the default description
    pub fn from_client(client: ArcMCPClient) -> Self {
        Self::new(client, None, None)
    }

    /// Get the server name this tool forwards to
    pub fn server_name(&self) -> &str {
        self.client.server_name()
    }

    /// Forward a query to the underlying client
    pub async fn run(&self, query: &str) -> crate::Result<String> {
        self.client.run_query(query).await
    }
}

#[async_trait]
impl Tool for MCPToolAdapter {
    async fn execute(&self, params: Value) -> agent_core::Result<Value> {
        let query = tool_input_text(&params).ok_or_else(|| {
            agent_core::Error::ProcessingFailed(format!(
                "Tool '{}' expects a text query, got {params}",
                self.name
            ))
        })?;

        debug!(tool = %self.name, server = %self.server_name(), "Forwarding query");

        let reply = self.run(query).await.map_err(|e| {
            agent_core::Error::ProcessingFailed(format!("Tool '{}' failed: {e}", self.name))
        })?;

        Ok(Value::String(reply))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        schema::query(&format!("Query to send to {}", self.server_name()))
    }
}
