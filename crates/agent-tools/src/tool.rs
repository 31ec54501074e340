//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// ReAct agents pass the raw `Action Input` as a JSON string; agents using
    /// native function calling pass an object matching `input_schema`.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}

/// Extract the text input of a tool call
///
/// Accepts a bare string or an object with a string `query` field.
pub fn tool_input_text(params: &Value) -> Option<&str> {
    match params {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("query").and_then(Value::as_str),
        _ => None,
    }
}
