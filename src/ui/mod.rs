//! Terminal rendering for the chat loop.

mod highlight;
mod output;

pub use highlight::Highlighter;
pub use output::{
    print_assistant, print_banner, print_prompt, print_thinking, print_transcript,
    print_turn_error, warn_audit_failure,
};
