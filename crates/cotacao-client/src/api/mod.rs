//! API client for the cotacao server

use anyhow::{Context, Result};
use cotacao_core::{within, Deadline};
use futures::StreamExt;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 300;

/// How a request ended, short of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The body was copied out in full
    Printed { bytes: u64 },
    /// The deadline expired first
    TimedOut,
}

pub struct Client {
    http: ReqwestClient,
    url: String,
    timeout: Duration,
}

impl Client {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let http = ReqwestClient::builder()
            .user_agent(concat!("cotacao-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, url, timeout })
    }

    /// Issue one GET and copy the body verbatim into `out`, all within the deadline.
    pub async fn deliver<W>(&self, out: &mut W) -> Result<Delivery>
    where
        W: AsyncWrite + Unpin,
    {
        match within(self.timeout, self.copy_body(out)).await {
            Deadline::Met(bytes) => Ok(Delivery::Printed { bytes: bytes? }),
            Deadline::Exceeded => Ok(Delivery::TimedOut),
        }
    }

    async fn copy_body<W>(&self, out: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        // The status is not interpreted; the body is printed as-is
        debug!("Server responded {}", response.status());

        let mut body = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.context("Failed to read response body")?;
            out.write_all(&chunk)
                .await
                .context("Failed to write response body")?;
            written += chunk.len() as u64;
        }
        out.flush().await?;

        Ok(written)
    }
}
