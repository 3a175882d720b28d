//! The HTTP exchange a send performs once per attempt.
//!
//! The dispatcher only sees status, the raw `Retry-After` value and the body;
//! how the request travels is up to the `Transport`.

mod easy;
mod parse;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::HttpMessage;

pub use easy::CurlTransport;

/// What came back from one exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Raw `Retry-After` header value, if the server sent one.
    pub retry_after: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }
}

/// The exchange could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("encoding request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Curl(#[from] curl::Error),

    #[error("transfer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Sends one multicast request and returns the server's answer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: &HttpMessage) -> Result<RawResponse, TransportError>;
}
