//! Quote types

use serde::{Deserialize, Serialize};

/// A USD-BRL quote snapshot as served by the upstream API.
///
/// The upstream encodes every value as text, numbers included. Missing keys
/// decode to empty strings, so `Quote::default()` is the zero record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub code: String,
    #[serde(rename = "codein")]
    pub code_in: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub variation_bid: String,
    #[serde(rename = "pctChange")]
    pub percent_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} bid={} ask={} at {}",
            self.code, self.code_in, self.bid, self.ask, self.create_date
        )
    }
}

/// The persisted projection of a [`Quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    pub id: String,
    pub bid: String,
    pub create_date: String,
}

impl StoredQuote {
    pub fn new(bid: String, create_date: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            bid,
            create_date,
        }
    }

    /// Project a quote into a fresh record. Every call gets a new id.
    pub fn from_quote(quote: &Quote) -> Self {
        Self::new(quote.bid.clone(), quote.create_date.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_upstream_payload() {
        let body = r#"[{
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.4512",
            "low": "5.4011",
            "varBid": "0.0123",
            "pctChange": "0.23",
            "bid": "5.4321",
            "ask": "5.4331",
            "timestamp": "1704067200",
            "create_date": "2024-01-01 00:00:00"
        }]"#;

        let quotes: Vec<Quote> = serde_json::from_str(body).unwrap();
        assert_eq!(quotes.len(), 1);

        let quote = &quotes[0];
        assert_eq!(quote.code, "USD");
        assert_eq!(quote.code_in, "BRL");
        assert_eq!(quote.variation_bid, "0.0123");
        assert_eq!(quote.percent_change, "0.23");
        assert_eq!(quote.bid, "5.4321");
        assert_eq!(quote.create_date, "2024-01-01 00:00:00");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let body = r#"[{"bid":"5.43","create_date":"2024-01-01 00:00:00","extra":1}]"#;
        let quotes: Vec<Quote> = serde_json::from_str(body).unwrap();

        assert_eq!(quotes[0].bid, "5.43");
        assert!(quotes[0].code.is_empty());
        assert!(quotes[0].ask.is_empty());
        assert!(!quotes[0].is_empty());
        assert!(Quote::default().is_empty());
    }

    #[test]
    fn test_stored_quote_ids_are_unique() {
        let quote = Quote {
            bid: "5.43".to_string(),
            create_date: "2024-01-01 00:00:00".to_string(),
            ..Default::default()
        };

        let first = StoredQuote::from_quote(&quote);
        let second = StoredQuote::from_quote(&quote);

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.bid, second.bid);
        assert_eq!(first.create_date, "2024-01-01 00:00:00");
    }
}
