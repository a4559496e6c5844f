/// Backup and restore errors. Any failure here is fatal to the
/// destructive operation that required the backup.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("backup I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("backup file not found: {path}")]
    NotFound { path: String },
}
