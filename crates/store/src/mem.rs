//! In-memory store backend.

use crate::{
    ChatIndexEntry, ChatIndexPatch, ChatIndexStore, Message, MessagePatch, MessageStore,
};
use compact_str::CompactString;
use std::{collections::BTreeMap, sync::Mutex};

/// In-memory implementation of both store contracts.
///
/// The default for tests and for hosts that persist elsewhere.
/// Individual calls are serialized by internal mutexes; no further
/// locking is required by callers.
#[derive(Default)]
pub struct InMemoryStore {
    messages: Mutex<BTreeMap<CompactString, Vec<Message>>>,
    index: Mutex<BTreeMap<CompactString, ChatIndexEntry>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for InMemoryStore {
    fn append(&self, message: Message) {
        self.messages
            .lock()
            .unwrap()
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message);
    }

    fn update(&self, conversation_id: &str, message_id: &str, patch: MessagePatch) {
        if let Some(messages) = self.messages.lock().unwrap().get_mut(conversation_id)
            && let Some(message) = messages.iter_mut().find(|m| m.id == message_id)
        {
            patch.apply(message);
        }
    }

    fn remove(&self, conversation_id: &str, message_id: &str) {
        if let Some(messages) = self.messages.lock().unwrap().get_mut(conversation_id) {
            messages.retain(|m| m.id != message_id);
        }
    }

    fn list(&self, conversation_id: &str) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl ChatIndexStore for InMemoryStore {
    fn upsert(&self, entry: ChatIndexEntry) {
        self.index
            .lock()
            .unwrap()
            .insert(entry.conversation_id.clone(), entry);
    }

    fn patch(&self, conversation_id: &str, patch: ChatIndexPatch) {
        if let Some(entry) = self.index.lock().unwrap().get_mut(conversation_id) {
            patch.apply(entry);
        }
    }

    fn get(&self, conversation_id: &str) -> Option<ChatIndexEntry> {
        self.index.lock().unwrap().get(conversation_id).cloned()
    }

    fn entries(&self) -> Vec<ChatIndexEntry> {
        let mut entries: Vec<_> = self.index.lock().unwrap().values().cloned().collect();
        entries.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
        entries
    }

    fn remove(&self, conversation_id: &str) {
        self.index.lock().unwrap().remove(conversation_id);
    }

    fn clear(&self) {
        self.index.lock().unwrap().clear();
    }
}
