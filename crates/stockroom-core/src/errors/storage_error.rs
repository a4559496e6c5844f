/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt blob for remote id {remote_id}: {message}")]
    InvalidBlob { remote_id: i64, message: String },

    #[error("unknown editable field: {key}")]
    UnknownField { key: String },
}
