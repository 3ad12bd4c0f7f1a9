//! The request body for OpenAI-compatible chat completions

use crate::{Config, Message};
use serde::Serialize;

/// The request body for the completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model we are using
    pub model: String,

    /// The messages to send to the API
    pub messages: Vec<Message>,

    /// Whether to stream the response
    pub stream: bool,
}

impl Request {
    /// Construct a request from the configuration and ordered history
    pub fn new(config: &Config, messages: &[Message]) -> Self {
        Self {
            model: config.model.clone(),
            messages: messages.to_vec(),
            stream: false,
        }
    }

    /// Enable streaming for the request
    pub fn stream(mut self) -> Self {
        self.stream = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_and_messages() {
        let config = Config::new("https://api.example.com/v1", "k", "gpt-4");
        let messages = [Message::user("hello")];
        let req = Request::new(&config, &messages).stream();

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }
}
