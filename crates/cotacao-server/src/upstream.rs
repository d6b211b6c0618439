//! Upstream quote provider over HTTP

use async_trait::async_trait;
use cotacao_core::{Quote, QuoteError, QuoteSource, Result};
use tracing::debug;

/// Reads the USD-BRL quote from a JSON endpoint returning an array of quotes.
pub struct HttpQuoteSource {
    http: reqwest::Client,
    url: String,
}

impl HttpQuoteSource {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn latest(&self) -> Result<Quote> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuoteError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::Upstream(e.to_string()))?;

        debug!("Upstream responded {}: {}", status, body);

        first_quote(&body)
    }
}

/// Decode a JSON array of quotes and keep the first one.
fn first_quote(body: &str) -> Result<Quote> {
    let quotes: Vec<Quote> = serde_json::from_str(body)?;
    quotes.into_iter().next().ok_or(QuoteError::EmptyResponse)
}
