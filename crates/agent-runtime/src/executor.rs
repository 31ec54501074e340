//! Agent executor for native tool-calling loops
//!
//! The AgentExecutor implements the function-calling agent loop:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response
//!
//! It also defines the configuration and event hooks shared with the
//! zero-shot ReAct agent.

use agent_core::{Context, Result, ToolStep};
use agent_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use agent_tools::{ToolRegistry, tool_input_text};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Answer returned when the iteration cap is hit before a final answer
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

/// Event handler for agent execution events
///
/// Implement this trait to receive callbacks while an agent runs, e.g. to
/// stream reasoning steps to a client.
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    /// Called with the raw LLM output of each iteration
    async fn on_thought(&self, _iteration: usize, _text: &str) {}

    /// Called when a tool execution starts
    async fn on_tool_start(&self, _id: &str, _name: &str, _input: &Value) {}

    /// Called when a tool execution completes
    async fn on_tool_done(
        &self,
        _id: &str,
        _name: &str,
        _result: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }

    /// Called when the agent completes
    async fn on_complete(&self, _result: &str) {}

    /// Called when an error occurs
    async fn on_error(&self, _error: &str) {}
}

/// No-op event handler for when events are not needed
pub struct NoOpEventHandler;

#[async_trait]
impl ExecutorEventHandler for NoOpEventHandler {}

/// Event handler that reports every step through `tracing`
///
/// Verbose handlers log at info level, quiet ones at debug.
pub struct LoggingEventHandler {
    verbose: bool,
}

impl LoggingEventHandler {
    /// Create a handler
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

macro_rules! log_step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

#[async_trait]
impl ExecutorEventHandler for LoggingEventHandler {
    async fn on_thought(&self, iteration: usize, text: &str) {
        log_step!(self.verbose, iteration, "{}", text.trim());
    }

    async fn on_tool_start(&self, _id: &str, name: &str, input: &Value) {
        log_step!(self.verbose, tool = %name, input = %input, "Calling tool");
    }

    async fn on_tool_done(
        &self,
        _id: &str,
        name: &str,
        result: std::result::Result<&Value, &str>,
        duration_ms: u64,
    ) {
        match result {
            Ok(value) => {
                log_step!(self.verbose, tool = %name, duration_ms, "Observation: {}", observation_text(value));
            }
            Err(error) => warn!(tool = %name, duration_ms, error, "Tool failed"),
        }
    }

    async fn on_complete(&self, result: &str) {
        log_step!(self.verbose, "Finished chain: {}", result);
    }

    async fn on_error(&self, error: &str) {
        warn!(error, "Agent run failed");
    }
}

/// Render a tool result as the text the LLM sees
pub fn observation_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt (tool-calling agents only)
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,

    /// Log each reasoning step at info level
    pub verbose: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            max_tokens: 1024,
            temperature: Some(0.7),
            verbose: false,
        }
    }
}

impl ExecutorConfig {
    /// Check the configuration can drive an agent
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(agent_core::Error::ConfigError(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(agent_core::Error::ConfigError(
                "model must not be empty".to_string(),
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(agent_core::Error::ConfigError(format!(
                    "temperature {t} is outside 0.0..=2.0"
                )));
            }
        }
        Ok(())
    }

    /// The event handler matching `verbose`
    pub fn default_event_handler(&self) -> Arc<dyn ExecutorEventHandler> {
        Arc::new(LoggingEventHandler::new(self.verbose))
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Arc<dyn ExecutorEventHandler>,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        let event_handler = config.default_event_handler();
        Self {
            provider,
            tool_registry,
            config,
            event_handler,
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Set the event handler for receiving execution events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop with a user query
    pub async fn run(&self, user_message: String, context: &mut Context) -> Result<String> {
        self.run_with_history(user_message, Vec::new(), context)
            .await
    }

    /// Execute the agent loop after previous conversation messages
    pub async fn run_with_history(
        &self,
        user_message: String,
        history: Vec<Message>,
        context: &mut Context,
    ) -> Result<String> {
        let mut conversation = history;
        conversation.push(Message::user(user_message));

        let result = self.run_conversation(conversation, context).await;
        if let Err(e) = &result {
            self.event_handler.on_error(&e.to_string()).await;
        }
        result
    }

    async fn run_conversation(
        &self,
        mut conversation: Vec<Message>,
        context: &mut Context,
    ) -> Result<String> {
        let tools = self.build_tool_definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            context.set_iterations(iteration);
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let mut request_builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens);

            if let Some(system) = &self.config.system_prompt {
                request_builder = request_builder.system(system.clone());
            }
            if let Some(temperature) = self.config.temperature {
                request_builder = request_builder.temperature(temperature);
            }
            // Only add tools if we have any
            if !tools.is_empty() {
                request_builder = request_builder.tools(tools.clone());
            }

            let response = self
                .provider
                .complete(request_builder.build())
                .await
                .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            if let Some(text) = response.message.text() {
                self.event_handler.on_thought(iteration, text).await;
            }

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn | StopReason::StopSequence => {
                    let text = response.message.text().unwrap_or_default().to_string();
                    info!(iteration, response_length = text.len(), "Agent completed");
                    self.event_handler.on_complete(&text).await;
                    return Ok(text);
                }

                StopReason::ToolUse => {
                    let tool_results = self.execute_tools(&response.message, context).await;

                    if tool_results.is_empty() {
                        return Err(agent_core::Error::ProcessingFailed(
                            "LLM requested tool use without any tool calls".to_string(),
                        ));
                    }

                    conversation.extend(tool_results);
                }

                StopReason::MaxTokens => {
                    return Err(agent_core::Error::ProcessingFailed(
                        "Response truncated due to token limit".to_string(),
                    ));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(ITERATION_LIMIT_MESSAGE.to_string())
    }

    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute tool calls from an assistant message
    ///
    /// Failures (including unknown tools) are reported back to the LLM as
    /// error results rather than aborting the run.
    async fn execute_tools(&self, message: &Message, context: &mut Context) -> Vec<Message> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            self.event_handler.on_tool_start(id, name, input).await;
            let input_text = tool_input_text(input)
                .map_or_else(|| input.to_string(), str::to_string);

            let Some(tool) = self.tool_registry.get(name) else {
                let error = format!(
                    "{name} is not a valid tool, try one of [{}].",
                    self.tool_registry.names().join(", ")
                );
                warn!(tool_name = %name, "Unknown tool requested");
                self.event_handler
                    .on_tool_done(id, name, Err(error.as_str()), 0)
                    .await;
                context.push_step(ToolStep {
                    tool: name.clone(),
                    input: input_text,
                    observation: error.clone(),
                });
                results.push(Message::tool_error(id.clone(), error));
                continue;
            };

            let start_time = Instant::now();
            let outcome = tool.execute(input.clone()).await;
            let duration_ms = start_time.elapsed().as_millis() as u64;

            let observation = match outcome {
                Ok(result) => {
                    self.event_handler
                        .on_tool_done(id, name, Ok(&result), duration_ms)
                        .await;
                    let text = observation_text(&result);
                    results.push(Message::tool_result(id.clone(), text.clone()));
                    text
                }
                Err(e) => {
                    let error = format!("Error: {e}");
                    self.event_handler
                        .on_tool_done(id, name, Err(error.as_str()), duration_ms)
                        .await;
                    results.push(Message::tool_error(id.clone(), error.clone()));
                    error
                }
            };

            context.push_step(ToolStep {
                tool: name.clone(),
                input: input_text,
                observation,
            });
        }

        results
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
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
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the event handler
    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;
        self.config.validate()?;

        let executor = AgentExecutor::new(provider, self.tool_registry, self.config);
        Ok(match self.event_handler {
            Some(handler) => executor.with_event_handler(handler),
            None => executor,
        })
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
