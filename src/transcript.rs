//! Records what the agent did during a turn and prepares it for display.

use regex::Regex;

use crate::toolkit::QUERY_TOOL;

/// Audit value used when a turn never executed any SQL.
pub const NO_SQL_COMMAND: &str = "N/A";

/// Action label for the closing step of a transcript.
pub const FINAL_ANSWER_LABEL: &str = "final answer";

/// Shown when a step carries no usable reasoning text.
pub const THOUGHT_PLACEHOLDER: &str = "The model is thinking...";

const FINISH_THOUGHT: &str = "The model has what it needs and is ready to answer.";

/// One entry in the agent's working transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A tool invocation and what came back from it.
    Action {
        tool_name: String,
        tool_input: String,
        observation: String,
        /// Raw reasoning text attached to the round that produced this
        /// call. May be empty.
        reasoning: String,
    },
    /// The closing answer of the turn.
    Finish { final_output: String },
}

/// A transcript step flattened for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBlock {
    pub thought: String,
    pub action: String,
    pub input: Option<String>,
    pub observation: String,
}

/// The first SQL statement the agent actually executed this turn, or
/// [`NO_SQL_COMMAND`] when it never ran one. Later executions are
/// ignored; the first is the one disclosed to the user.
pub fn extract_sql_command(steps: &[Step]) -> String {
    for step in steps {
        if let Step::Action {
            tool_name,
            tool_input,
            ..
        } = step
        {
            if tool_name == QUERY_TOOL {
                return tool_input.clone();
            }
        }
    }
    NO_SQL_COMMAND.to_string()
}

/// Flatten the transcript into displayable blocks, in order.
pub fn render_transcript(steps: &[Step]) -> Vec<DisplayBlock> {
    steps
        .iter()
        .map(|step| match step {
            Step::Action {
                tool_name,
                tool_input,
                observation,
                reasoning,
            } => DisplayBlock {
                thought: reasoning_excerpt(reasoning),
                action: tool_name.clone(),
                input: Some(tool_input.clone()),
                observation: observation.clone(),
            },
            Step::Finish { final_output } => DisplayBlock {
                thought: FINISH_THOUGHT.to_string(),
                action: FINAL_ANSWER_LABEL.to_string(),
                input: None,
                observation: final_output.clone(),
            },
        })
        .collect()
}

/// Pull the text between a `Thought:` marker and the next `Action:`
/// marker (or end of text). A missing marker or an empty thought yields
/// the placeholder.
pub fn reasoning_excerpt(reasoning: &str) -> String {
    let re = Regex::new(r"(?s)Thought:\s*(.*?)(?:\nAction:|$)").unwrap();
    let excerpt = re
        .captures(reasoning)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();
    if excerpt.is_empty() {
        THOUGHT_PLACEHOLDER.to_string()
    } else {
        excerpt
    }
}
