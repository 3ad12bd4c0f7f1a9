//! Notification seam.
//!
//! Failures and configuration prompts surface to the host through this
//! trait rather than as conversation content. Delivery mechanics
//! (toasts, log lines, status bars) are the host's concern.

/// How urgent a notification is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational
    Info,
    /// A completed action worth confirming
    Success,
    /// Something needs the user's attention
    Warning,
    /// An operation failed
    Error,
}

/// Receives user-facing notifications from the session manager.
pub trait Notifier: Send + Sync {
    /// Deliver a notification to the user
    fn notify(&self, message: &str, severity: Severity);
}

/// A notifier that discards everything.
#[derive(Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _severity: Severity) {}
}
