use super::{BackupError, ConfigError, StorageError};

/// Errors from the reconciliation/sync runners.
/// Aggregates subsystem errors via `From` conversions.
///
/// Per-item remote rejections are NOT errors of this kind — they are
/// collected in the run report so that one bad item never aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("remote returned status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("invalid remote response: {message}")]
    InvalidResponse { message: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("backup error: {0}")]
    Backup(#[from] BackupError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
