//! Helpers to build JSON schemas for tool inputs

use serde_json::{Value, json};

/// Create a JSON schema for an object with properties
///
/// # Example
///
/// ```
/// use agent_tools::schema;
/// use serde_json::json;
///
/// let schema = schema::object(json!({"query": schema::string("Search query")}), &["query"]);
/// assert_eq!(schema["required"][0], "query");
/// ```
pub fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// String property schema
pub fn string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

/// Schema for tools that take a single free-text `query`
pub fn query(description: &str) -> Value {
    object(json!({ "query": string(description) }), &["query"])
}
