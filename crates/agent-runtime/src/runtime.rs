//! Runtime for building agents with dependency injection
//!
//! The AgentRuntime owns the shared resources (LLM provider, tool registry)
//! and builds agents of any `AgentType` on top of them.

use agent_core::{Agent, Result};
use agent_llm::LLMProvider;
use agent_tools::{Tool, ToolRegistry};
use std::sync::Arc;
use tracing::info;

use crate::agents::{AgentType, ReactAgent, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig, ExecutorEventHandler};

/// Runtime for building agents over a shared provider and tool set
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, AgentType, ExecutorConfig};
/// use agent_llm::LLMProvider;
/// use agent_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// # fn example(provider: Arc<dyn LLMProvider>, tools: Arc<ToolRegistry>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .tool_registry(tools)
///     .build()?;
///
/// let agent = runtime.create_agent(
///     AgentType::ZeroShotReactDescription,
///     ExecutorConfig::default(),
///     "assistant",
/// )?;
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(provider: Arc<dyn LLMProvider>, tool_registry: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            tool_registry,
            event_handler: None,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Build an agent of the given type
    ///
    /// Agents use the runtime's event handler when one is set, otherwise a
    /// logging handler honoring `config.verbose`.
    pub fn create_agent(
        &self,
        agent_type: AgentType,
        config: ExecutorConfig,
        name: impl Into<String>,
    ) -> Result<Box<dyn Agent>> {
        config.validate()?;
        let name = name.into();
        let handler = self
            .event_handler
            .clone()
            .unwrap_or_else(|| config.default_event_handler());

        info!(
            agent = %name,
            %agent_type,
            model = %config.model,
            tools = ?self.tool_registry.names(),
            "Creating agent"
        );

        let agent: Box<dyn Agent> = match agent_type {
            AgentType::ZeroShotReactDescription => Box::new(
                ReactAgent::new(
                    self.provider.clone(),
                    self.tool_registry.clone(),
                    config,
                    name,
                )
                .with_event_handler(handler),
            ),
            AgentType::ToolCalling => {
                let executor =
                    AgentExecutor::new(self.provider.clone(), self.tool_registry.clone(), config)
                        .with_event_handler(handler);
                Box::new(ToolAgent::new(executor, name))
            }
        };
        Ok(agent)
    }
}

/// Build an agent over `tools`, in the order given
pub fn initialize_agent(
    tools: Vec<Arc<dyn Tool>>,
    provider: Arc<dyn LLMProvider>,
    agent_type: AgentType,
    config: ExecutorConfig,
) -> Result<Box<dyn Agent>> {
    let registry = Arc::new(ToolRegistry::from_tools(tools));
    AgentRuntime::new(provider, registry).create_agent(agent_type, config, agent_type.as_str())
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            event_handler: None,
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the event handler given to every agent
    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(AgentRuntime {
            provider,
            tool_registry,
            event_handler: self.event_handler,
        })
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
