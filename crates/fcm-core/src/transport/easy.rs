//! libcurl transport (via the `curl` crate).
//!
//! Each attempt is one blocking POST on a fresh `Easy` handle, run on the tokio
//! blocking pool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::str;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::parse::parse_headers;
use super::{RawResponse, Transport, TransportError};
use crate::config::FcmConfig;
use crate::message::HttpMessage;

/// Posts JSON messages to the FCM legacy HTTP endpoint.
#[derive(Clone)]
pub struct CurlTransport {
    endpoint: String,
    api_key: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl std::fmt::Debug for CurlTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurlTransport")
            .field("endpoint", &self.endpoint)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CurlTransport {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    /// Build from config; fails if no API key is configured.
    pub fn from_config(cfg: &FcmConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("no FCM API key configured (set api_key in config.toml or FCM_API_KEY)")?;
        Ok(Self::new(cfg.endpoint.clone(), api_key).with_timeouts(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.request_timeout_secs),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(&self, message: &HttpMessage) -> Result<RawResponse, TransportError> {
        let body = serde_json::to_vec(message)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            recipients = message.registration_ids.len(),
            "send json {}",
            String::from_utf8_lossy(&body)
        );

        // Dropping this future aborts the blocking transfer.
        let abort = CancellationToken::new();
        let _abort_on_drop = abort.clone().drop_guard();
        let this = self.clone();
        let resp = tokio::task::spawn_blocking(move || this.post(&body, &abort)).await??;

        tracing::debug!(
            status = resp.status,
            "response: {}",
            String::from_utf8_lossy(&resp.body)
        );
        Ok(resp)
    }
}

impl CurlTransport {
    /// Blocking POST. Runs in the current thread.
    /// Fails with an aborted-by-callback error soon after `abort` is cancelled.
    fn post(&self, body: &[u8], abort: &CancellationToken) -> Result<RawResponse, curl::Error> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut response_body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.progress(true)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append(&format!("Authorization: key={}", self.api_key))?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                response_body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(|_, _, _, _| !abort.is_cancelled())?;
            transfer.perform()?;
        }

        let status = easy.response_code()? as u16;
        let head = parse_headers(&header_lines);

        Ok(RawResponse {
            status,
            retry_after: head.retry_after,
            body: response_body,
        })
    }
}
