//! Storage layer
//!
//! Uses SQLite (embedded) through a pool owned by the server process.

pub mod db;

pub use db::Database;
