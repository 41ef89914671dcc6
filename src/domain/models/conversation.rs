//! Conversation snapshot consumed by the scheduler tick.
//!
//! The scheduler only reads a bounded window of recent messages plus the
//! current to-do list; the full conversational state stays with the agent
//! host.

use serde::{Deserialize, Serialize};

use super::todo::TodoTask;

/// Who produced a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    Tool,
}

/// One message in the agent's recent conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: MessageRole,
    pub content: String,
}

impl AgentMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a tool-output message.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Tool, content)
    }

    /// Shorthand for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Read-only view of an agent's state at one model-request tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    /// Messages in arrival order; the scheduler scans only the tail.
    pub messages: Vec<AgentMessage>,
    /// The agent's current to-do list.
    pub todos: Vec<TodoTask>,
}

impl ConversationSnapshot {
    pub fn new(messages: Vec<AgentMessage>, todos: Vec<TodoTask>) -> Self {
        Self { messages, todos }
    }

    /// The most recent `n` messages, oldest first.
    pub fn recent_messages(&self, n: usize) -> &[AgentMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}
