//! Quote source and sink traits

use crate::Result;
use async_trait::async_trait;
use cotacao_types::{Quote, StoredQuote};

/// Where quotes come from
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the most recent quote. Makes exactly one attempt.
    async fn latest(&self) -> Result<Quote>;
}

/// Where quotes are persisted
#[async_trait]
pub trait QuoteSink: Send + Sync {
    /// Project `quote` into a [`StoredQuote`] and write it.
    async fn record(&self, quote: &Quote) -> Result<StoredQuote>;
}
