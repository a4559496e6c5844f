//! Backup configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the backup subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackupConfig {
    /// Custom backup directory. Defaults to `backups/` next to the store.
    pub backup_dir: Option<String>,
}
