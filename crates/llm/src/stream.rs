//! Streaming response chunks

use serde::Deserialize;

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl StreamChunk {
    /// Create a chunk carrying a text fragment
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                delta: Delta {
                    content: Some(content.into()),
                },
                ..Default::default()
            }],
        }
    }

    /// Create a terminal chunk with a `stop` finish reason
    pub fn stop() -> Self {
        Self {
            choices: vec![Choice {
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            }],
        }
    }

    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<FinishReason> {
        self.choices.first().and_then(|c| c.finish_reason)
    }
}

/// A completion choice within a chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Choice {
    /// The delta content of the choice
    #[serde(default)]
    pub delta: Delta,

    /// The reason the model stopped generating, in the final chunk
    pub finish_reason: Option<FinishReason>,
}

/// Incremental content delivered by a chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delta {
    /// The text fragment, if any
    pub content: Option<String>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Token limit reached
    Length,
    /// Content was filtered
    ContentFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_delta_frame() {
        let chunk: StreamChunk = serde_json::from_str(
            r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"Hi"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.content(), Some("Hi"));
        assert!(chunk.reason().is_none());
    }

    #[test]
    fn parses_finish_frame() {
        let chunk: StreamChunk = serde_json::from_str(
            r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(chunk.content().is_none());
        assert_eq!(chunk.reason(), Some(FinishReason::Stop));
    }

    #[test]
    fn empty_content_is_filtered() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":""}}]}"#).unwrap();
        assert!(chunk.content().is_none());
    }
}
