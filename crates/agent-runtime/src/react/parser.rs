//! Parser for ReAct-formatted LLM output

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Marker that introduces the final answer
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("valid action regex")
});

static ACTION_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Action\s*\d*\s*:").expect("valid action regex"));

static ACTION_INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)[\s]*Action\s*\d*\s*Input\s*\d*\s*:").expect("valid action input regex")
});

/// What the LLM decided to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactStep {
    /// Call a tool
    Action {
        /// Tool name
        tool: String,
        /// Text passed to the tool
        input: String,
        /// The raw LLM output that produced this step
        log: String,
    },
    /// Stop with an answer
    Finish {
        /// The final answer text
        output: String,
        /// The raw LLM output
        log: String,
    },
}

/// LLM output that does not follow the ReAct format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid Format: Missing 'Action:' after 'Thought:'")]
    MissingAction,

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:'")]
    MissingActionInput,

    #[error("Parsing LLM output produced both a final answer and a parse-able action: {0}")]
    FinalAnswerAndAction(String),

    #[error("Could not parse LLM output: `{0}`")]
    Unparseable(String),
}

/// Parse one LLM completion into the next step
///
/// An `Action:`/`Action Input:` pair wins only when there is no
/// `Final Answer:` in the same output.
pub fn parse(text: &str) -> Result<ReactStep, ParseError> {
    let includes_answer = text.contains(FINAL_ANSWER_MARKER);

    if let Some(caps) = ACTION_RE.captures(text) {
        if includes_answer {
            return Err(ParseError::FinalAnswerAndAction(text.to_string()));
        }
        let tool = caps[1].trim().to_string();
        let input = caps[2].trim().trim_matches('"').to_string();
        return Ok(ReactStep::Action {
            tool,
            input,
            log: text.to_string(),
        });
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER_MARKER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        return Ok(ReactStep::Finish {
            output,
            log: text.to_string(),
        });
    }

    if !ACTION_ONLY_RE.is_match(text) {
        Err(ParseError::MissingAction)
    } else if !ACTION_INPUT_RE.is_match(text) {
        Err(ParseError::MissingActionInput)
    } else {
        Err(ParseError::Unparseable(text.to_string()))
    }
}
