//! Test doubles shared by the server's unit tests

use async_trait::async_trait;
use axum::{routing::get, Router};
use cotacao_core::{Quote, QuoteError, QuoteSink, QuoteSource, Result, StoredQuote};
use std::sync::Mutex;
use std::time::Duration;

pub fn quote(bid: &str) -> Quote {
    Quote {
        code: "USD".to_string(),
        code_in: "BRL".to_string(),
        bid: bid.to_string(),
        create_date: "2024-01-01 00:00:00".to_string(),
        ..Default::default()
    }
}

/// Serve `body` at `/json/USD-BRL` on an ephemeral port and return the URL.
pub async fn serve_upstream(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/json/USD-BRL", get(move || async move { body }));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/json/USD-BRL", addr)
}

pub struct StaticSource(pub Quote);

#[async_trait]
impl QuoteSource for StaticSource {
    async fn latest(&self) -> Result<Quote> {
        Ok(self.0.clone())
    }
}

pub struct SlowSource(pub Quote, pub Duration);

#[async_trait]
impl QuoteSource for SlowSource {
    async fn latest(&self) -> Result<Quote> {
        tokio::time::sleep(self.1).await;
        Ok(self.0.clone())
    }
}

pub struct FailingSource;

#[async_trait]
impl QuoteSource for FailingSource {
    async fn latest(&self) -> Result<Quote> {
        Err(QuoteError::Upstream("connection refused".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    stored: Mutex<Vec<StoredQuote>>,
}

impl RecordingSink {
    pub fn bids(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.bid.clone())
            .collect()
    }
}

#[async_trait]
impl QuoteSink for RecordingSink {
    async fn record(&self, quote: &Quote) -> Result<StoredQuote> {
        let stored = StoredQuote::from_quote(quote);
        self.stored.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

pub struct SlowSink(pub Duration);

#[async_trait]
impl QuoteSink for SlowSink {
    async fn record(&self, quote: &Quote) -> Result<StoredQuote> {
        tokio::time::sleep(self.0).await;
        Ok(StoredQuote::from_quote(quote))
    }
}

pub struct FailingSink;

#[async_trait]
impl QuoteSink for FailingSink {
    async fn record(&self, _quote: &Quote) -> Result<StoredQuote> {
        Err(QuoteError::Database("disk I/O error".to_string()))
    }
}
