//! Chat-history index entries

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Chat-history metadata for one conversation.
///
/// Distinct from message content; used for conversation listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatIndexEntry {
    /// The conversation this entry describes (unique key)
    pub conversation_id: CompactString,
    /// Human-readable label for the conversation
    pub title: String,
    /// Timestamp of the most recent message (unix milliseconds)
    pub last_activity_at: u64,
}

impl ChatIndexEntry {
    /// Create a new entry
    pub fn new(
        conversation_id: impl Into<CompactString>,
        title: impl Into<String>,
        last_activity_at: u64,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            title: title.into(),
            last_activity_at,
        }
    }
}

/// A partial update to a chat-index entry
#[derive(Debug, Clone, Default)]
pub struct ChatIndexPatch {
    /// Replacement title, if any
    pub title: Option<String>,
    /// Replacement last-activity timestamp, if any
    pub last_activity_at: Option<u64>,
}

impl ChatIndexPatch {
    /// Set the replacement title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the replacement last-activity timestamp
    pub fn last_activity_at(mut self, at: u64) -> Self {
        self.last_activity_at = Some(at);
        self
    }

    /// Apply the patch to an entry
    pub(crate) fn apply(self, entry: &mut ChatIndexEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(at) = self.last_activity_at {
            entry.last_activity_at = at;
        }
    }
}
