//! MCP client implementations

use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;

mod echo;

pub use echo::EchoMCPClient;

/// Connection to a single tool server
///
/// Note: All methods use &self (not &mut self) so a client can be shared
/// through an Arc by every tool adapted from it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MCPClient: Send + Sync {
    /// Name of the server this client talks to
    fn server_name(&self) -> &str;

    /// Send a free-text query to the server and return its reply
    async fn run_query(&self, query: &str) -> Result<String>;
}

/// Type alias for Arc-wrapped MCP client
pub type ArcMCPClient = Arc<dyn MCPClient>;
