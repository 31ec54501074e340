//! Tool registry for managing available tools

use crate::Tool;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Registry for managing tools
///
/// Tools are listed in the order they were registered, which is the order
/// they are presented to the LLM. Registering a name that already exists
/// replaces the earlier tool in place.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<Vec<Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given tools, in order
    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        match tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => {
                debug!(tool = tool.name(), "Replacing registered tool");
                tools[index] = tool;
            }
            None => {
                debug!(tool = tool.name(), "Registering tool");
                tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.clone()
    }

    /// Names of all registered tools in registration order
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Result;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct Named {
        name: &'static str,
        reply: &'static str,
    }

    #[async_trait]
    impl Tool for Named {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(json!(self.reply))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            crate::schema::query("input")
        }
    }

    fn tool(name: &'static str, reply: &'static str) -> Arc<dyn Tool> {
        Arc::new(Named { name, reply })
    }

    #[test]
    fn test_preserves_registration_order() {
        let registry = ToolRegistry::from_tools([
            tool("WebSearch", "a"),
            tool("StoryWriter", "b"),
            tool("ImageGenerator", "c"),
        ]);

        assert_eq!(
            registry.names(),
            vec!["WebSearch", "StoryWriter", "ImageGenerator"]
        );
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let registry = ToolRegistry::from_tools([tool("A", "first"), tool("B", "b")]);
        registry.register(tool("A", "second"));

        assert_eq!(registry.names(), vec!["A", "B"]);
        let out = tokio_test::block_on(registry.get("A").unwrap().execute(json!("x"))).unwrap();
        assert_eq!(out, json!("second"));
    }

    #[test]
    fn test_get_missing() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("WebSearch").is_none());
    }
}
