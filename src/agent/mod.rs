//! The LLM-driven agent that answers a turn by calling database tools.

mod chat_api;
pub mod payload;
mod prompt;
mod wire;

pub use chat_api::ChatApiAgent;
pub use prompt::{system_instructions, DEFAULT_SYSTEM_INSTRUCTIONS};
pub use wire::{FunctionCall, Message, RequestBody, ToolCall};

use async_trait::async_trait;

use crate::error::Result;
use crate::session::ChatMessage;
use crate::transcript::Step;

/// Reasoning rounds allowed before the turn is abandoned.
pub const MAX_REASONING_ROUNDS: usize = 15;

/// What a completed agent run hands back to the turn orchestrator.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub final_answer: String,
    pub steps: Vec<Step>,
}

/// Anything that can take an instruction plus the prior conversation
/// and produce an answer along with its working transcript.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&self, instruction: &str, history: &[ChatMessage]) -> Result<AgentOutcome>;
}
