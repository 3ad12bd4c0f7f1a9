//! Failure classification for the completion transport

use reqwest::StatusCode;

/// A classified transport failure.
///
/// Produced before any chunk reaches the consumer when the endpoint
/// rejects the request, and mid-stream when the connection drops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint rejected the credentials (401/403)
    #[error("authentication rejected by completion endpoint")]
    Auth,

    /// The endpoint returned a non-success status
    #[error("completion endpoint returned status {0}")]
    Status(StatusCode),

    /// A network or stream-level fault
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Whether this failure is an authentication rejection
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }
}
