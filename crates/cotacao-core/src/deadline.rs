//! Deadline-bounded calls
//!
//! Every outbound hop (upstream fetch, database insert, client request) runs
//! under its own budget. Running out of time is a recognized outcome rather
//! than an error, so it gets its own type instead of an error variant.

use std::future::Future;
use std::time::Duration;

/// Result of running a future under a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline<T> {
    /// The future finished in time
    Met(T),
    /// The budget ran out and the future was dropped
    Exceeded,
}

impl<T> Deadline<T> {
    pub fn is_exceeded(&self) -> bool {
        matches!(self, Deadline::Exceeded)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Deadline<U> {
        match self {
            Deadline::Met(value) => Deadline::Met(f(value)),
            Deadline::Exceeded => Deadline::Exceeded,
        }
    }

    pub fn met(self) -> Option<T> {
        match self {
            Deadline::Met(value) => Some(value),
            Deadline::Exceeded => None,
        }
    }
}

/// Drive `fut` for at most `limit`. Exceeding the limit cancels only `fut`.
pub async fn within<F, T>(limit: Duration, fut: F) -> Deadline<T>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(value) => Deadline::Met(value),
        Err(_) => Deadline::Exceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fast_future_meets_deadline() {
        let outcome = within(Duration::from_millis(500), async { 42 }).await;
        assert_eq!(outcome, Deadline::Met(42));
        assert!(!outcome.is_exceeded());
    }

    #[tokio::test]
    async fn test_slow_future_exceeds_deadline() {
        let outcome = within(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            42
        })
        .await;

        assert!(outcome.is_exceeded());
        assert_eq!(outcome.met(), None);
    }

    #[tokio::test]
    async fn test_errors_pass_through_untouched() {
        let outcome: Deadline<std::result::Result<(), &str>> =
            within(Duration::from_millis(500), async { Err("boom") }).await;
        assert_eq!(outcome, Deadline::Met(Err("boom")));
    }

    #[test]
    fn test_map() {
        assert_eq!(Deadline::Met(2).map(|v| v * 2), Deadline::Met(4));
        assert_eq!(Deadline::<i32>::Exceeded.map(|v| v * 2), Deadline::Exceeded);
    }
}
