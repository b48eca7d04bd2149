//! SQLite bootstrap for the local storage medium.
//!
//! Connections handed to `SqliteKvStore` are configured and fully migrated;
//! schema version lives in `PRAGMA user_version`. Failures surface as
//! `StorageError`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
