//! Connection pragmas applied to every store connection.

use rusqlite::Connection;
use stockroom_core::errors::StorageError;

/// Apply the standard pragma set.
/// NORMAL sync is sufficient under WAL. Backups checkpoint first so the
/// store file alone is a complete copy.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply pragmas: {e}"),
    })
}
