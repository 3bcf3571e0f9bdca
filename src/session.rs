//! In-memory conversation state for one chat session.

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Opening assistant message every session starts with.
pub const GREETING: &str =
    "Hello! I'm the store database assistant. I can look up, add, update, and delete \
     records for you. What would you like to do?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Full message history of the running session, greeting included.
/// Lives only as long as the process; nothing is persisted.
pub struct ChatSession {
    session_id: Uuid,
    started_at: DateTime<Local>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Local::now(),
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// The most recent `limit` entries of a message history; zero means no
/// cap. The agent applies this before replaying history to the model.
pub fn recent_window(history: &[ChatMessage], limit: usize) -> &[ChatMessage] {
    if limit == 0 || history.len() <= limit {
        history
    } else {
        &history[history.len() - limit..]
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
