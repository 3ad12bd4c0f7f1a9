//! Streaming completion client for OpenAI-compatible endpoints.
//!
//! This crate provides the transport layer for chat completions:
//! `Message`, `Config`, `Request`, `StreamChunk`, the [`CompletionClient`]
//! trait, and [`HttpProvider`] for HTTP(S) endpoints with SSE-framed
//! streaming responses.
//!
//! It knows nothing about conversations, stored messages, or titles:
//! callers hand it an ordered message history and consume a lazy stream
//! of text chunks terminated by completion or a classified failure.

pub use config::Config;
pub use error::Error;
pub use message::{Message, Role};
pub use noop::NoopClient;
pub use provider::{CompletionClient, HttpProvider};
pub use request::Request;
pub use reqwest::{Client, StatusCode};
pub use stream::{Choice, Delta, FinishReason, StreamChunk};

mod config;
mod error;
mod message;
mod noop;
mod provider;
mod request;
mod stream;
