//! Database module
//!
//! SQLite connection pooling and migrations for the capture history.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
