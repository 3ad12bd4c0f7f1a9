//! No-op completion client for testing.
//!
//! Implements [`CompletionClient`] but panics on `stream`. Intended for
//! unit tests that exercise session logic up to (but never past) the
//! point where a stream would be opened.

use crate::{CompletionClient, Config, Error, Message, StreamChunk};
use futures_core::Stream;

/// A no-op client that panics on any actual completion call.
///
/// # Panics
///
/// `stream` panics if polled. Only use this client in tests that must
/// not reach the network (e.g. unconfigured-endpoint gates).
#[derive(Clone, Copy)]
pub struct NoopClient;

impl CompletionClient for NoopClient {
    fn stream(
        &self,
        _config: &Config,
        _messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk, Error>> + Send {
        async_stream::stream! {
            panic!("NoopClient::stream called — not intended for real completion calls");
            #[allow(unreachable_code)]
            {
                yield Ok(StreamChunk::stop());
            }
        }
    }
}
