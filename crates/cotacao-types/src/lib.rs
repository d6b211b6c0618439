//! Cotacao Types - Pure data definitions shared by the server and client
//!
//! No async runtime or I/O lives here.

pub mod quote;

pub use quote::*;
