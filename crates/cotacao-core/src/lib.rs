//! Cotacao Core Library
//!
//! Error type, deadline handling and the storage/source ports shared by the
//! quote server and client.

// Re-export pure types from cotacao-types
pub use cotacao_types::*;

pub mod deadline;
pub mod error;
pub mod ports;

pub use deadline::{within, Deadline};
pub use error::{QuoteError, Result};
pub use ports::{QuoteSink, QuoteSource};
