//! Zero-shot ReAct prompt construction

use agent_tools::Tool;
use std::sync::Arc;

const PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

const FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

/// Stop sequence that keeps the LLM from inventing observations
pub const OBSERVATION_STOP: &str = "\nObservation:";

/// Build the prompt prefix for `input`; the scratchpad is appended after it
///
/// Tools appear one per line as `name: description`, in the given order.
pub fn build_prompt(tools: &[Arc<dyn Tool>], input: &str) -> String {
    let tool_lines = tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let tool_names = tools
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");
    let format_instructions = FORMAT_INSTRUCTIONS.replace("{tool_names}", &tool_names);
    let suffix = format!("Begin!\n\nQuestion: {input}\nThought:");

    [PREFIX, tool_lines.as_str(), format_instructions.as_str(), suffix.as_str()].join("\n\n")
}

/// Scratchpad entry for one completed action
pub fn scratchpad_entry(log: &str, observation: &str) -> String {
    format!("{log}\nObservation: {observation}\nThought: ")
}
