//! Agent runtime for executing agents with dependency injection
//!
//! This crate provides the agent loops (zero-shot ReAct and native tool
//! calling), the AgentRuntime that builds them over a shared provider and
//! tool registry, and the event hooks used to observe a run.

pub mod agents;
pub mod executor;
pub mod react;
pub mod runtime;

#[cfg(test)]
mod test_support;

// Re-export key types
pub use agents::{AgentType, ParseAgentTypeError, ReactAgent, ToolAgent};
pub use executor::{
    AgentExecutor, AgentExecutorBuilder, ExecutorConfig, ExecutorEventHandler,
    ITERATION_LIMIT_MESSAGE, LoggingEventHandler, NoOpEventHandler,
};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, initialize_agent};
