//! Configuration for the completion endpoint

use serde::{Deserialize, Serialize};

/// Endpoint configuration: base URL, credentials, and model.
///
/// All three fields must be non-blank before a stream can be opened;
/// callers gate on [`is_configured`](Config::is_configured).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Base URL of the OpenAI-compatible API (e.g. `https://api.example.com/v1`)
    pub base_url: String,

    /// The API key sent as a bearer token
    pub api_key: String,

    /// The model to use
    pub model: String,
}

impl Config {
    /// Create a new configuration
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Whether base URL, key, and model are all present
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.model.trim().is_empty()
    }

    /// The chat completions endpoint derived from the base URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        assert!(!Config::default().is_configured());
        assert!(!Config::new("https://api.example.com/v1", " ", "gpt-4").is_configured());
        assert!(Config::new("https://api.example.com/v1", "sk-1", "gpt-4").is_configured());
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = Config::new("https://api.example.com/v1/", "k", "m");
        assert_eq!(
            config.endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }
}
