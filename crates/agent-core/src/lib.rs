//! Core abstractions for mcp-agent-rs
//!
//! Defines the `Agent` trait every reasoning loop implements, the per-request
//! `Context`, and the error type the other crates convert into at their seams.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::{Context, ToolStep};
pub use error::{Error, Result};
