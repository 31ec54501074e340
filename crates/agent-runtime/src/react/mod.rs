//! Zero-shot ReAct agent
//!
//! The agent picks a tool from its description alone. Each iteration sends
//! the prompt plus the scratchpad of earlier actions and observations, then
//! parses the completion into either a tool call or a final answer:
//!
//! ```text
//! Thought: I need recent facts
//! Action: WebSearch
//! Action Input: Spinoza
//! Observation: ...
//! Thought: I now know the final answer
//! Final Answer: ...
//! ```

pub mod parser;
pub mod prompt;

use agent_core::{Agent, Context, Result, ToolStep};
use agent_llm::{CompletionRequest, LLMProvider};
use agent_tools::{Tool, ToolRegistry};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::executor::{
    ExecutorConfig, ExecutorEventHandler, ITERATION_LIMIT_MESSAGE, observation_text,
};
pub use parser::{FINAL_ANSWER_MARKER, ParseError, ReactStep, parse};
pub use prompt::{OBSERVATION_STOP, build_prompt};

/// Agent that reasons in the Thought/Action/Observation format
pub struct ReactAgent {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Arc<dyn ExecutorEventHandler>,
    name: String,
}

impl ReactAgent {
    /// Create a new ReAct agent
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
        name: impl Into<String>,
    ) -> Self {
        let event_handler = config.default_event_handler();
        Self {
            provider,
            tool_registry,
            config,
            event_handler,
            name: name.into(),
        }
    }

    /// Set the event handler for receiving execution events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Get the agent configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Get the registry of tools the agent may call
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .add_message(agent_llm::Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .stop_sequence(OBSERVATION_STOP);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        let response = self
            .provider
            .complete(builder.build())
            .await
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        debug!(
            stop_reason = ?response.stop_reason,
            output_tokens = response.usage.output_tokens,
            "LLM response received"
        );
        Ok(response.message.text().unwrap_or_default().to_string())
    }

    /// Run one tool and return the observation fed back to the LLM
    async fn observe(&self, iteration: usize, tool_name: &str, input: &str) -> String {
        let id = format!("step_{iteration}");
        let params = Value::String(input.to_string());
        self.event_handler.on_tool_start(&id, tool_name, &params).await;

        let Some(tool) = self.tool_registry.get(tool_name) else {
            let observation = format!(
                "{tool_name} is not a valid tool, try one of [{}].",
                self.tool_registry.names().join(", ")
            );
            warn!(tool = %tool_name, "Unknown tool requested");
            self.event_handler
                .on_tool_done(&id, tool_name, Err(observation.as_str()), 0)
                .await;
            return observation;
        };

        let start_time = Instant::now();
        let outcome = tool.execute(params).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(value) => {
                self.event_handler
                    .on_tool_done(&id, tool_name, Ok(&value), duration_ms)
                    .await;
                observation_text(&value)
            }
            Err(e) => {
                let observation = format!("Error: {e}");
                self.event_handler
                    .on_tool_done(&id, tool_name, Err(observation.as_str()), duration_ms)
                    .await;
                observation
            }
        }
    }

    async fn run(&self, input: &str, context: &mut Context) -> Result<String> {
        let tools: Vec<Arc<dyn Tool>> = self.tool_registry.list_tools();
        let base_prompt = build_prompt(&tools, input);
        let mut scratchpad = String::new();

        for iteration in 1..=self.config.max_iterations {
            context.set_iterations(iteration);
            info!(
                agent = %self.name,
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let output = self.complete(format!("{base_prompt}{scratchpad}")).await?;
            self.event_handler.on_thought(iteration, &output).await;

            match parse(&output) {
                Ok(ReactStep::Finish { output, .. }) => {
                    info!(iteration, response_length = output.len(), "Agent completed");
                    self.event_handler.on_complete(&output).await;
                    return Ok(output);
                }
                Ok(ReactStep::Action { tool, input, log }) => {
                    let observation = self.observe(iteration, &tool, &input).await;
                    scratchpad.push_str(&prompt::scratchpad_entry(&log, &observation));
                    context.push_step(ToolStep {
                        tool,
                        input,
                        observation,
                    });
                }
                Err(e) => {
                    return Err(agent_core::Error::ProcessingFailed(format!(
                        "An output parsing error occurred: {e}"
                    )));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(ITERATION_LIMIT_MESSAGE.to_string())
    }
}

#[async_trait]
impl Agent for ReactAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let result = self.run(&input, context).await;
        if let Err(e) = &result {
            self.event_handler.on_error(&e.to_string()).await;
        }
        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedProvider, echo_registry};
    use agent_llm::MessageContent;

    fn agent(provider: Arc<ScriptedProvider>, max_iterations: usize) -> ReactAgent {
        let config = ExecutorConfig {
            max_iterations,
            ..ExecutorConfig::default()
        };
        ReactAgent::new(provider, echo_registry(), config, "react")
    }

    fn prompt_text(request: &CompletionRequest) -> String {
        match &request.messages[0].content {
            Some(MessageContent::Text(text)) => text.clone(),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_action_then_final_answer() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            " I should search.\nAction: WebSearch\nAction Input: Spinoza",
            " I now know the final answer\nFinal Answer: Spinoza ground lenses.",
        ]));
        let agent = agent(provider.clone(), 15);

        let mut ctx = Context::new();
        let answer = agent
            .process("Tell me about Spinoza".into(), &mut ctx)
            .await
            .unwrap();

        assert_eq!(answer, "Spinoza ground lenses.");
        assert_eq!(ctx.iterations(), Some(2));
        assert_eq!(
            ctx.steps(),
            vec![ToolStep {
                tool: "WebSearch".into(),
                input: "Spinoza".into(),
                observation: "Response from web_search_server for query: Spinoza".into(),
            }]
        );

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].stop_sequences,
            Some(vec![OBSERVATION_STOP.to_string()])
        );
        assert_eq!(requests[0].temperature, Some(0.7));
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert!(requests[0].tools.is_none());

        let second = prompt_text(&requests[1]);
        assert!(second.ends_with(
            "Thought: I should search.\nAction: WebSearch\nAction Input: Spinoza\n\
             Observation: Response from web_search_server for query: Spinoza\nThought: "
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_observation() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            "Action: ImageGenerator\nAction Input: portrait",
            "Final Answer: no image",
        ]));
        let agent = agent(provider, 15);

        let mut ctx = Context::new();
        assert_eq!(agent.process("x".into(), &mut ctx).await.unwrap(), "no image");
        assert_eq!(
            ctx.steps()[0].observation,
            "ImageGenerator is not a valid tool, try one of [WebSearch, StoryWriter]."
        );
    }

    #[tokio::test]
    async fn test_tool_error_becomes_observation() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            "Action: WebSearch\nAction Input: fail",
            "Final Answer: gave up",
        ]));
        let agent = agent(provider, 15);

        let mut ctx = Context::new();
        assert_eq!(agent.process("x".into(), &mut ctx).await.unwrap(), "gave up");
        assert!(ctx.steps()[0].observation.starts_with("Error: "));
        assert!(ctx.steps()[0].observation.contains("web_search_server is down"));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            "Action: WebSearch\nAction Input: a",
            "Action: WebSearch\nAction Input: b",
        ]));
        let agent = agent(provider.clone(), 2);

        let mut ctx = Context::new();
        let answer = agent.process("x".into(), &mut ctx).await.unwrap();
        assert_eq!(answer, ITERATION_LIMIT_MESSAGE);
        assert_eq!(ctx.steps().len(), 2);
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_parse_error_fails_run() {
        let provider = Arc::new(ScriptedProvider::texts(&["I will just chat."]));
        let agent = agent(provider, 15);

        let err = agent
            .process("x".into(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Missing 'Action:'"));
    }

    #[tokio::test]
    async fn test_provider_error_fails_run() {
        let provider = Arc::new(ScriptedProvider::texts(&[]));
        let agent = agent(provider, 15);

        let err = agent
            .process("x".into(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("script exhausted"));
    }
}
