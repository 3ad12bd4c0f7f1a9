//! The completion client trait and its HTTP implementation

use crate::{Config, Error, Message, Request, StreamChunk};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode, header};

/// A client that turns an ordered message history into a lazy chunk stream.
///
/// The stream is finite and non-restartable: it ends with normal
/// completion (the source is exhausted) or a single [`Error`] item.
/// Dropping the stream cancels it; no further chunks are produced.
pub trait CompletionClient: Send + Sync {
    /// Open a streaming completion request over the given history
    fn stream(
        &self,
        config: &Config,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send;
}

/// HTTP transport for OpenAI-compatible chat completion endpoints.
#[derive(Clone, Default)]
pub struct HttpProvider {
    client: Client,
}

impl HttpProvider {
    /// Create a new provider over a shared reqwest client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl CompletionClient for HttpProvider {
    fn stream(
        &self,
        config: &Config,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        let body = Request::new(config, messages).stream();
        let request = self
            .client
            .post(config.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&config.api_key)
            .json(&body);

        try_stream! {
            tracing::debug!(endpoint = %config.endpoint(), model = %config.model, "opening completion stream");
            let response = request.send().await?;
            let status = response.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                Err(Error::Auth)?;
            } else if !status.is_success() {
                Err(Error::Status(status))?;
            }

            let mut stream = response.bytes_stream();
            let mut chunk_count = 0usize;
            while let Some(bytes) = stream.next().await {
                let bytes = bytes?;
                let text = String::from_utf8_lossy(&bytes);
                for chunk in parse_frames(&text) {
                    chunk_count += 1;
                    yield chunk;
                }
            }
            tracing::debug!("completion stream closed after {chunk_count} chunks");
        }
    }
}

/// Parse the SSE `data: ` frames in a body fragment, skipping `[DONE]`.
fn parse_frames(text: &str) -> Vec<StreamChunk> {
    text.split("data: ")
        .skip(1)
        .filter(|s| !s.starts_with("[DONE]"))
        .filter_map(|data| {
            let trimmed = data.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str::<StreamChunk>(trimmed) {
                Ok(chunk) => Some(chunk),
                Err(e) => {
                    tracing::warn!("failed to parse chunk: {e}, data: {trimmed}");
                    None
                }
            }
        })
        .collect()
}
