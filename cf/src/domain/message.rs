//! Conversation messages and the ordered conversation log
//!
//! The log's insertion order is replay order: `format()` is the deterministic
//! projection handed to agents as conversational context.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the refinement conversation, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered message history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Append one message
    pub fn push(&mut self, message: Message) {
        debug!(role = %message.role, "push: appending message");
        self.messages.push(message);
    }

    /// Messages in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove all messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Render the log as `role: content` lines for agent input
    pub fn format(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the log plus a user line that has not been committed yet
    ///
    /// Used to hand an agent the transcript a turn will produce before any
    /// session mutation happens.
    pub fn format_with_pending(&self, pending_user: &str) -> String {
        if self.messages.is_empty() {
            format!("user: {pending_user}")
        } else {
            format!("{}\nuser: {pending_user}", self.format())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");

        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_format_preserves_order() {
        let mut log = ConversationLog::default();
        log.push(Message::assistant("Welcome!"));
        log.push(Message::user("Make it 4 credits"));
        log.push(Message::assistant("Done."));
        assert_eq!(
            log.format(),
            "assistant: Welcome!\nuser: Make it 4 credits\nassistant: Done."
        );
    }

    #[test]
    fn test_format_empty_log() {
        let log = ConversationLog::default();
        assert_eq!(log.format(), "");
    }

    #[test]
    fn test_format_with_pending() {
        let mut log = ConversationLog::default();
        assert_eq!(log.format_with_pending("hi"), "user: hi");
        log.push(Message::assistant("Welcome!"));
        assert_eq!(log.format_with_pending("hi"), "assistant: Welcome!\nuser: hi");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = ConversationLog::default();
        log.push(Message::user("one"));
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
