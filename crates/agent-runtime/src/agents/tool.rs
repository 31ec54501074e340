//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with native tool calling
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface.
/// Tool steps and the iteration count are written back to the context.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, AgentType, ExecutorConfig};
/// use agent_core::{Agent, Context};
///
/// # async fn example(runtime: AgentRuntime) -> agent_core::Result<()> {
/// let agent = runtime.create_agent(AgentType::ToolCalling, ExecutorConfig::default(), "researcher")?;
///
/// let mut context = Context::new();
/// let response = agent.process("Search for Spinoza".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.executor.run(input, context).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
