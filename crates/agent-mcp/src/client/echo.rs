//! In-process stand-in for a tool server

use async_trait::async_trait;
use tracing::info;

use super::MCPClient;
use crate::Result;

/// Client that answers every query without any I/O
///
/// The reply is `Response from {server_name} for query: {query}`, which lets
/// the whole agent pipeline run end to end before real servers exist.
#[derive(Debug, Clone)]
pub struct EchoMCPClient {
    server_name: String,
}

impl EchoMCPClient {
    /// Create a client for the named server
    pub fn new(server_name: impl Into<String>) -> Self {
        let server_name = server_name.into();
        info!(server = %server_name, "Initializing connection to {server_name}");
        Self { server_name }
    }

    /// Reply the server gives for `query`
    pub fn reply_for(&self, query: &str) -> String {
        format!("Response from {} for query: {query}", self.server_name)
    }
}

#[async_trait]
impl MCPClient for EchoMCPClient {
    fn server_name(&self) -> &str {
        &self.server_name
    }

    async fn run_query(&self, query: &str) -> Result<String> {
        info!(server = %self.server_name, "Sending query to {}: {query}", self.server_name);
        Ok(self.reply_for(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_format() {
        let client = EchoMCPClient::new("web_search_server");
        assert_eq!(client.server_name(), "web_search_server");

        let reply = client.run_query("Spinoza recent scholarship").await.unwrap();
        assert_eq!(
            reply,
            "Response from web_search_server for query: Spinoza recent scholarship"
        );
    }

    #[tokio::test]
    async fn test_query_passed_verbatim() {
        let client = EchoMCPClient::new("story_writer_server");
        let query = "  \"quoted\" input, with: colons\nand lines  ";
        let reply = client.run_query(query).await.unwrap();
        assert_eq!(
            reply,
            format!("Response from story_writer_server for query: {query}")
        );
    }

    #[tokio::test]
    async fn test_empty_query() {
        let client = EchoMCPClient::new("image_generator_server");
        let reply = client.run_query("").await.unwrap();
        assert_eq!(reply, "Response from image_generator_server for query: ");
    }
}
