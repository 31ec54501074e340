//! MCP tool-server clients for mcp-agent-rs
//!
//! This crate connects agents to tool servers:
//! - `MCPClient` abstracts a connection to one tool server
//! - `EchoMCPClient` is an in-process stand-in that answers every query with
//!   a formatted acknowledgement
//! - `MCPToolAdapter` exposes any client as an `agent_tools::Tool`
//! - `MCPConfig` lists which servers to connect and how to name their tools
//!
//! # Example
//!
//! ```no_run
//! use agent_mcp::MCPConfig;
//!
//! # fn example() -> agent_mcp::Result<()> {
//! let tools = MCPConfig::default().build_tools()?;
//! assert_eq!(tools.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod tool;

// Re-export commonly used types
pub use client::{ArcMCPClient, EchoMCPClient, MCPClient};
pub use config::{MCPConfig, MCPServerConfig};
pub use error::MCPError;
pub use tool::MCPToolAdapter;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
