//! SQLite-backed store.
//!
//! Persistent implementation of both store contracts. All SQL lives in
//! `sql/*.sql` files, loaded via `include_str!`. Backend faults are
//! logged and swallowed so the contracts stay total.

use crate::{
    Author, ChatIndexEntry, ChatIndexPatch, ChatIndexStore, Message, MessagePatch, MessageStatus,
    MessageStore,
};
use compact_str::CompactString;
use rusqlite::Connection;
use std::{path::Path, sync::Mutex};

const SQL_SCHEMA: &str = include_str!("../sql/schema.sql");
const SQL_INSERT_MESSAGE: &str = include_str!("../sql/insert_message.sql");
const SQL_UPDATE_MESSAGE: &str = include_str!("../sql/update_message.sql");
const SQL_DELETE_MESSAGE: &str = include_str!("../sql/delete_message.sql");
const SQL_SELECT_MESSAGES: &str = include_str!("../sql/select_messages.sql");
const SQL_CLEAR_MESSAGES: &str = include_str!("../sql/clear_messages.sql");
const SQL_UPSERT_ENTRY: &str = include_str!("../sql/upsert_entry.sql");
const SQL_PATCH_ENTRY: &str = include_str!("../sql/patch_entry.sql");
const SQL_SELECT_ENTRY: &str = include_str!("../sql/select_entry.sql");
const SQL_SELECT_ENTRIES: &str = include_str!("../sql/select_entries.sql");
const SQL_DELETE_ENTRY: &str = include_str!("../sql/delete_entry.sql");
const SQL_CLEAR_INDEX: &str = include_str!("../sql/clear_index.sql");

/// SQLite-backed message and chat-index store.
///
/// Wraps a `rusqlite::Connection` in a `Mutex`; individual calls are
/// serialized, which is all the session manager requires.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        Self::from_conn(Connection::open(path)?)
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> rusqlite::Result<Self> {
        Self::from_conn(Connection::open_in_memory()?)
    }

    fn from_conn(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SQL_SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl MessageStore for SqliteStore {
    fn append(&self, message: Message) {
        let conn = self.conn.lock().unwrap();
        if let Err(e) = conn.execute(
            SQL_INSERT_MESSAGE,
            rusqlite::params![
                message.id.as_str(),
                message.conversation_id.as_str(),
                message.author.as_str(),
                message.content,
                message.created_at as i64,
                message.status.as_str(),
            ],
        ) {
            tracing::warn!("failed to append message {}: {e}", message.id);
        }
    }

    fn update(&self, conversation_id: &str, message_id: &str, patch: MessagePatch) {
        let conn = self.conn.lock().unwrap();
        let status = patch.status.map(|s| s.as_str());
        if let Err(e) = conn.execute(
            SQL_UPDATE_MESSAGE,
            rusqlite::params![conversation_id, message_id, patch.content, status],
        ) {
            tracing::warn!("failed to update message {message_id}: {e}");
        }
    }

    fn remove(&self, conversation_id: &str, message_id: &str) {
        let conn = self.conn.lock().unwrap();
        if let Err(e) = conn.execute(
            SQL_DELETE_MESSAGE,
            rusqlite::params![conversation_id, message_id],
        ) {
            tracing::warn!("failed to remove message {message_id}: {e}");
        }
    }

    fn list(&self, conversation_id: &str) -> Vec<Message> {
        let conn = self.conn.lock().unwrap();
        let Ok(mut stmt) = conn.prepare(SQL_SELECT_MESSAGES) else {
            return Vec::new();
        };
        stmt.query_map([conversation_id], |row| {
            let id: String = row.get(0)?;
            let author: String = row.get(1)?;
            let content: String = row.get(2)?;
            let created_at: i64 = row.get(3)?;
            let status: String = row.get(4)?;
            Ok(Message {
                id: CompactString::new(id),
                conversation_id: CompactString::new(conversation_id),
                author: Author::parse(&author).unwrap_or(Author::User),
                content,
                created_at: created_at as u64,
                status: MessageStatus::parse(&status).unwrap_or(MessageStatus::Final),
            })
        })
        .map(|rows| rows.filter_map(|r| r.ok()).collect())
        .unwrap_or_default()
    }

    fn clear(&self) {
        let conn = self.conn.lock().unwrap();
        conn.execute(SQL_CLEAR_MESSAGES, []).ok();
    }
}

impl ChatIndexStore for SqliteStore {
    fn upsert(&self, entry: ChatIndexEntry) {
        let conn = self.conn.lock().unwrap();
        if let Err(e) = conn.execute(
            SQL_UPSERT_ENTRY,
            rusqlite::params![
                entry.conversation_id.as_str(),
                entry.title,
                entry.last_activity_at as i64,
            ],
        ) {
            tracing::warn!("failed to upsert index entry {}: {e}", entry.conversation_id);
        }
    }

    fn patch(&self, conversation_id: &str, patch: ChatIndexPatch) {
        let conn = self.conn.lock().unwrap();
        let at = patch.last_activity_at.map(|v| v as i64);
        if let Err(e) = conn.execute(
            SQL_PATCH_ENTRY,
            rusqlite::params![conversation_id, patch.title, at],
        ) {
            tracing::warn!("failed to patch index entry {conversation_id}: {e}");
        }
    }

    fn get(&self, conversation_id: &str) -> Option<ChatIndexEntry> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(SQL_SELECT_ENTRY, [conversation_id], |row| {
            let id: String = row.get(0)?;
            let title: String = row.get(1)?;
            let at: i64 = row.get(2)?;
            Ok(ChatIndexEntry::new(id, title, at as u64))
        })
        .ok()
    }

    fn entries(&self) -> Vec<ChatIndexEntry> {
        let conn = self.conn.lock().unwrap();
        let Ok(mut stmt) = conn.prepare(SQL_SELECT_ENTRIES) else {
            return Vec::new();
        };
        stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let title: String = row.get(1)?;
            let at: i64 = row.get(2)?;
            Ok(ChatIndexEntry::new(id, title, at as u64))
        })
        .map(|rows| rows.filter_map(|r| r.ok()).collect())
        .unwrap_or_default()
    }

    fn remove(&self, conversation_id: &str) {
        let conn = self.conn.lock().unwrap();
        conn.execute(SQL_DELETE_ENTRY, [conversation_id]).ok();
    }

    fn clear(&self) {
        let conn = self.conn.lock().unwrap();
        conn.execute(SQL_CLEAR_INDEX, []).ok();
    }
}
