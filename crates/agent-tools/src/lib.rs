//! Tool management and execution framework for mcp-agent-rs
//!
//! Tools are the actions an agent can take. Each one has a name, a
//! description the LLM reads to decide when to use it, and a JSON Schema
//! for its input.

pub mod registry;
pub mod schema;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, tool_input_text};
