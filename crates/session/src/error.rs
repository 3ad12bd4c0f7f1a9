//! Session failure taxonomy

/// A classified failure of a session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Message text was empty after trimming; nothing was mutated
    #[error("message text is empty")]
    InvalidInput,

    /// Endpoint, key, or model is missing; no stream was opened
    #[error("completion endpoint is not configured")]
    ConfigurationRequired,

    /// A send is already streaming for this conversation
    #[error("a reply is already streaming for this conversation")]
    Busy,

    /// The endpoint rejected the credentials; the placeholder was removed
    #[error("authentication rejected by completion endpoint")]
    Authentication,

    /// A network or stream-level fault; the placeholder was removed
    #[error("transport failure: {0}")]
    Transport(String),

    /// The send was cancelled mid-stream; silent, placeholder removed
    #[error("send was cancelled")]
    Cancelled,
}

impl From<llm::Error> for SessionError {
    fn from(e: llm::Error) -> Self {
        match e {
            llm::Error::Auth => Self::Authentication,
            other => Self::Transport(other.to_string()),
        }
    }
}
