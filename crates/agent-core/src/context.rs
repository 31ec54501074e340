//! Execution context for agents
//!
//! The `Context` struct is a key-value store passed to an agent for a single
//! request. Callers put request metadata in; agents write back what they did
//! (how many reasoning steps ran, which tools were called).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Session ID for tracking
    pub const SESSION_ID: &str = "session_id";
    /// Number of reasoning iterations the agent ran
    pub const ITERATIONS: &str = "iterations";
    /// Tool calls made while answering, as a list of `ToolStep`
    pub const INTERMEDIATE_STEPS: &str = "intermediate_steps";
}

/// One tool invocation recorded by an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStep {
    /// Tool name the agent chose
    pub tool: String,
    /// Text input passed to the tool
    pub input: String,
    /// What the tool returned (or the error text fed back to the agent)
    pub observation: String,
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new().with_session_id("session-123");
/// assert_eq!(ctx.session_id(), Some("session-123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.insert(keys::SESSION_ID, serde_json::json!(session_id.into()));
        self
    }

    /// Get the session ID
    pub fn session_id(&self) -> Option<&str> {
        self.get(keys::SESSION_ID).and_then(|v| v.as_str())
    }

    /// Number of iterations recorded by the last agent run
    pub fn iterations(&self) -> Option<u64> {
        self.get(keys::ITERATIONS).and_then(serde_json::Value::as_u64)
    }

    /// Record the number of iterations an agent ran
    pub fn set_iterations(&mut self, iterations: usize) {
        self.insert(keys::ITERATIONS, serde_json::json!(iterations));
    }

    /// Append a tool step to the intermediate steps list
    pub fn push_step(&mut self, step: ToolStep) {
        let mut steps = self.steps();
        steps.push(step);
        // ToolStep is plain strings, serialization cannot fail
        if let Ok(value) = serde_json::to_value(steps) {
            self.insert(keys::INTERMEDIATE_STEPS, value);
        }
    }

    /// Tool steps recorded so far
    pub fn steps(&self) -> Vec<ToolStep> {
        self.get_typed(keys::INTERMEDIATE_STEPS)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Remove a value from the context
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Merge another context into this one (other values override)
    pub fn merge(&mut self, other: Context) {
        self.data.extend(other.data);
    }
}
