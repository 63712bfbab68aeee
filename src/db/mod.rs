/// Database module for field-intake
///
/// Handles all database operations using SQLite and sqlx.
/// Implements connection pooling for performance.

pub mod accounts;
pub mod connection;
pub mod models;
pub mod records;

pub use connection::Database;
pub use models::*;
