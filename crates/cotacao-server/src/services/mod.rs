//! Business logic services

pub mod quote;

pub use quote::{QuoteService, StoreOutcome};
