//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// An agent takes a natural-language request and produces a final answer,
/// possibly after several rounds of LLM calls and tool invocations.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return the final answer
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Initialize the agent (optional)
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Shutdown the agent (optional)
    async fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    #[async_trait]
    impl Agent for Upper {
        async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
            Ok(input.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    #[tokio::test]
    async fn test_default_lifecycle_hooks() {
        let mut agent = Upper;
        assert!(agent.initialize().await.is_ok());

        let mut ctx = Context::new();
        let out = agent.process("spinoza".to_string(), &mut ctx).await.unwrap();
        assert_eq!(out, "SPINOZA");

        assert!(agent.shutdown().await.is_ok());
        assert_eq!(agent.name(), "upper");
    }
}
