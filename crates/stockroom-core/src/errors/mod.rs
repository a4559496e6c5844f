//! Error handling for stockroom.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod backup_error;
pub mod config_error;
pub mod storage_error;
pub mod sync_error;

pub use backup_error::BackupError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;
pub use sync_error::SyncError;
