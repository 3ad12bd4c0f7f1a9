//! Durable message and chat-index stores.
//!
//! Two synchronous, policy-free contracts back the session manager:
//!
//! - [`MessageStore`]: conversation id → ordered message sequence.
//! - [`ChatIndexStore`]: conversation id → chat-history metadata
//!   (title, last activity), used for conversation listing.
//!
//! Both traits are total: operations never fail on valid ids, and
//! operating on an unknown conversation yields an empty result rather
//! than an error. Backend faults in [`SqliteStore`] are logged and
//! swallowed, so the contracts stay total either way.
//!
//! [`InMemoryStore`] is the default for tests and embedding hosts;
//! [`SqliteStore`] persists across restarts.

pub use index::{ChatIndexEntry, ChatIndexPatch};
pub use mem::InMemoryStore;
pub use message::{Author, Message, MessagePatch, MessageStatus, now_millis};
pub use sqlite::SqliteStore;

mod index;
mod mem;
mod message;
mod sqlite;

/// Durable mapping from conversation id to an ordered message sequence.
pub trait MessageStore: Send + Sync {
    /// Append a message to its conversation
    fn append(&self, message: Message);

    /// Apply a partial update to a message
    fn update(&self, conversation_id: &str, message_id: &str, patch: MessagePatch);

    /// Remove a message entirely
    fn remove(&self, conversation_id: &str, message_id: &str);

    /// All messages of a conversation in insertion order
    fn list(&self, conversation_id: &str) -> Vec<Message>;

    /// Remove every message in every conversation
    fn clear(&self);
}

/// Durable mapping from conversation id to chat-history metadata.
pub trait ChatIndexStore: Send + Sync {
    /// Insert or replace an entry
    fn upsert(&self, entry: ChatIndexEntry);

    /// Apply a partial update; a no-op if the entry is absent
    fn patch(&self, conversation_id: &str, patch: ChatIndexPatch);

    /// Get the entry for a conversation, if any
    fn get(&self, conversation_id: &str) -> Option<ChatIndexEntry>;

    /// All entries, most recent activity first
    fn entries(&self) -> Vec<ChatIndexEntry>;

    /// Remove the entry for a conversation
    fn remove(&self, conversation_id: &str);

    /// Remove every entry
    fn clear(&self);
}
