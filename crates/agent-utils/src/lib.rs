//! Shared utilities for mcp-agent-rs
//!
//! Logging setup and the environment-driven application configuration used
//! by the CLI and the LLM provider wiring.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
