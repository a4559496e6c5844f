//! Connection management: a single serialized writer connection.
//!
//! The engine's concurrency model is one logical worker per run, so a
//! mutex around one connection is the whole story — callers serialize
//! runs, the store serializes statements.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use stockroom_core::errors::StorageError;

use self::pragmas::apply_pragmas;
use crate::migrations;

pub use writer::with_immediate_transaction;

/// Owns the store's connection and knows where the store file lives.
pub struct StoreManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl StoreManager {
    /// Open a store at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Execute an operation with the serialized connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute an operation inside a BEGIN IMMEDIATE transaction.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T, StorageError>,
    {
        self.with_conn(|conn| with_immediate_transaction(conn, f))
    }

    /// Run a WAL checkpoint (TRUNCATE mode). Called before file-level
    /// backups so the store file alone holds every committed write.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
    }

    /// Get the store file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
