//! Quote service: fetch then store, each hop under its own deadline

use cotacao_core::{within, Deadline, Quote, QuoteSink, QuoteSource, Result, StoredQuote};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How a store attempt ended, short of a fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored(StoredQuote),
    TimedOut,
}

pub struct QuoteService {
    source: Arc<dyn QuoteSource>,
    sink: Arc<dyn QuoteSink>,
    fetch_timeout: Duration,
    store_timeout: Duration,
}

impl QuoteService {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        sink: Arc<dyn QuoteSink>,
        fetch_timeout: Duration,
        store_timeout: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            fetch_timeout,
            store_timeout,
        }
    }

    /// Fetch the latest quote. A missed deadline yields the zero quote.
    pub async fn fetch(&self) -> Result<Quote> {
        match within(self.fetch_timeout, self.source.latest()).await {
            Deadline::Met(result) => {
                let quote = result?;
                debug!("Fetched quote: {:?}", quote);
                Ok(quote)
            }
            Deadline::Exceeded => {
                warn!(
                    "Timed out fetching the dollar quote after {:?}",
                    self.fetch_timeout
                );
                Ok(Quote::default())
            }
        }
    }

    /// Persist `quote`. A missed deadline is logged and reported, not raised.
    pub async fn store(&self, quote: &Quote) -> Result<StoreOutcome> {
        match within(self.store_timeout, self.sink.record(quote)).await {
            Deadline::Met(result) => {
                let stored = result?;
                debug!("Stored quote {} (bid={})", stored.id, stored.bid);
                Ok(StoreOutcome::Stored(stored))
            }
            Deadline::Exceeded => {
                warn!(
                    "Timed out storing the dollar quote after {:?}",
                    self.store_timeout
                );
                Ok(StoreOutcome::TimedOut)
            }
        }
    }

    /// One full request cycle. The store runs whatever the fetch produced.
    pub async fn refresh(&self) -> Result<Quote> {
        let quote = self.fetch().await?;
        let outcome = self.store(&quote).await?;
        info!(
            "Quote refreshed: {} (stored: {})",
            quote,
            matches!(outcome, StoreOutcome::Stored(_))
        );
        Ok(quote)
    }
}
