//! Query modules, one per table. Free functions over `&Connection` so
//! callers compose them inside a single transaction when needed.

pub mod edits;
pub mod movements;
pub mod products;
pub mod snapshots;

use stockroom_core::errors::StorageError;

/// Shorthand for wrapping a rusqlite error.
pub(crate) fn sql_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Seconds since the Unix epoch, for created_at/fetched_at columns.
pub(crate) fn now_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}
