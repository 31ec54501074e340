//! Scripted provider and stub tools shared by the unit tests

use agent_core::Result;
use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Role, StopReason, TokenUsage,
};
use agent_tools::{Tool, ToolRegistry, schema, tool_input_text};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Provider that replays canned responses and records every request
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose replies are plain text completions
    pub fn texts(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| CompletionResponse::text(*r)).collect())
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LLMError::RequestFailed("script exhausted".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Assistant turn that calls `name` with a `query`
pub fn tool_call(id: &str, name: &str, query: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input: json!({ "query": query }),
            }])),
        },
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

/// Tool that answers like an MCP server stub
pub struct EchoTool {
    name: String,
    server: String,
}

impl EchoTool {
    pub fn new(name: &str, server: &str) -> Self {
        Self {
            name: name.to_string(),
            server: server.to_string(),
        }
    }
}

#[async_trait]
impl Tool for EchoTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let query = tool_input_text(&params)
            .ok_or_else(|| agent_core::Error::ProcessingFailed("no query".to_string()))?;
        if query == "fail" {
            return Err(agent_core::Error::ProcessingFailed(format!(
                "{} is down",
                self.server
            )));
        }
        Ok(Value::String(format!(
            "Response from {} for query: {query}",
            self.server
        )))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Echo stub"
    }

    fn input_schema(&self) -> Value {
        schema::query("Query")
    }
}

pub fn echo_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(EchoTool::new("WebSearch", "web_search_server")),
        Arc::new(EchoTool::new("StoryWriter", "story_writer_server")),
    ]
}

pub fn echo_registry() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::from_tools(echo_tools()))
}
