//! Stored conversation messages

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A message stored within a conversation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Unique message identifier (UUID v4), generated at creation
    pub id: CompactString,
    /// The conversation this message belongs to
    pub conversation_id: CompactString,
    /// Who authored the message
    pub author: Author,
    /// Message text; grows append-only while streaming, frozen once final
    pub content: String,
    /// Creation timestamp (unix milliseconds)
    pub created_at: u64,
    /// Lifecycle status; only assistant messages may be non-final
    pub status: MessageStatus,
}

impl Message {
    /// Create a final user message with a fresh id and current timestamp
    pub fn user(conversation_id: impl Into<CompactString>, content: impl Into<String>) -> Self {
        Self {
            id: CompactString::new(uuid::Uuid::new_v4().to_string()),
            conversation_id: conversation_id.into(),
            author: Author::User,
            content: content.into(),
            created_at: now_millis(),
            status: MessageStatus::Final,
        }
    }

    /// Create an empty pending assistant placeholder
    pub fn placeholder(conversation_id: impl Into<CompactString>) -> Self {
        Self {
            id: CompactString::new(uuid::Uuid::new_v4().to_string()),
            conversation_id: conversation_id.into(),
            author: Author::Assistant,
            content: String::new(),
            created_at: now_millis(),
            status: MessageStatus::Pending,
        }
    }

    /// Whether this message is still pending or streaming
    pub fn is_settled(&self) -> bool {
        self.status == MessageStatus::Final
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Authored by the user
    User,
    /// Authored by the assistant
    Assistant,
}

impl Author {
    /// Stable string form used by persistent backends
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// Lifecycle status of a message.
///
/// Within a conversation at most one message is non-final at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Content is frozen
    Final,
    /// Placeholder created, no content yet
    Pending,
    /// Content is visibly growing
    Streaming,
}

impl MessageStatus {
    /// Stable string form used by persistent backends
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Pending => "pending",
            Self::Streaming => "streaming",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "final" => Some(Self::Final),
            "pending" => Some(Self::Pending),
            "streaming" => Some(Self::Streaming),
            _ => None,
        }
    }
}

/// A partial update to a stored message
#[derive(Debug, Clone, Default)]
pub struct MessagePatch {
    /// Replacement content, if any
    pub content: Option<String>,
    /// Replacement status, if any
    pub status: Option<MessageStatus>,
}

impl MessagePatch {
    /// Set the replacement content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the replacement status
    pub fn status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply the patch to a message
    pub(crate) fn apply(self, message: &mut Message) {
        if let Some(content) = self.content {
            message.content = content;
        }
        if let Some(status) = self.status {
            message.status = status;
        }
    }
}

/// Return the current unix timestamp in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_final() {
        let msg = Message::user("c1", "hello");
        assert_eq!(msg.author, Author::User);
        assert_eq!(msg.status, MessageStatus::Final);
        assert!(msg.is_settled());
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn placeholders_are_pending_and_empty() {
        let msg = Message::placeholder("c1");
        assert_eq!(msg.author, Author::Assistant);
        assert_eq!(msg.status, MessageStatus::Pending);
        assert!(msg.content.is_empty());
        assert!(!msg.is_settled());
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Message::user("c1", "x");
        let b = Message::user("c1", "x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_round_trips_string_form() {
        for status in [
            MessageStatus::Final,
            MessageStatus::Pending,
            MessageStatus::Streaming,
        ] {
            assert_eq!(MessageStatus::parse(status.as_str()), Some(status));
        }
        assert!(MessageStatus::parse("bogus").is_none());
    }
}
