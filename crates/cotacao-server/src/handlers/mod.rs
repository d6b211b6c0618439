//! HTTP handlers

pub mod quote;
