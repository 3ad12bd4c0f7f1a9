//! Streaming conversation session manager.
//!
//! [`SessionManager`] owns the "send message → stream reply → reconcile"
//! operation for any number of independent conversations. For each send
//! it appends the user message, keeps the chat index (title, last
//! activity) in sync, opens a completion stream, applies chunks to a
//! single pending assistant placeholder, and finalizes or discards that
//! placeholder depending on how the stream ends.
//!
//! Invariants upheld regardless of failure timing:
//!
//! - at most one send is active per conversation (overlaps are rejected);
//! - at most one message per conversation is ever non-final;
//! - a failed or cancelled stream leaves no partial assistant message
//!   behind; failures surface through the [`Notifier`] seam, never as
//!   conversation content.

pub use error::SessionError;
pub use manager::SessionManager;
pub use notify::{NullNotifier, Notifier, Severity};
pub use title::TitlePolicy;

mod error;
mod manager;
mod notify;
mod title;
