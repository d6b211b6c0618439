//! Port traits - boundaries between the request flow and its adapters

pub mod quote;

pub use quote::*;
