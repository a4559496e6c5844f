//! Point-in-time store backups with `latest`/`prev` rotation.
//!
//! Backups are plain byte-for-byte copies of the store file, named
//! `<store>-<label>-<timestamp>.bak`. On every backup the previous
//! `latest` alias is rotated to `prev`, so "undo the last operation"
//! never requires scanning the backup directory.
//!
//! This component takes no locks; callers must ensure no concurrent
//! store access during restore.

use std::fs;
use std::path::{Path, PathBuf};

use stockroom_core::errors::BackupError;
use tracing::{info, warn};

/// Manages backups of one store file.
pub struct BackupManager {
    store_path: PathBuf,
    backup_dir: PathBuf,
    store_name: String,
}

fn io_err(path: &Path, e: std::io::Error) -> BackupError {
    BackupError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

impl BackupManager {
    /// Create a manager for the store at `store_path`, writing backups
    /// into `backup_dir` (created on first use).
    pub fn new(store_path: &Path, backup_dir: &Path) -> Self {
        let store_name = store_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("store")
            .to_string();
        Self {
            store_path: store_path.to_path_buf(),
            backup_dir: backup_dir.to_path_buf(),
            store_name,
        }
    }

    /// Default layout: `backups/` next to the store file.
    pub fn beside_store(store_path: &Path) -> Self {
        let dir = store_path
            .parent()
            .map(|p| p.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));
        Self::new(store_path, &dir)
    }

    /// Path of the always-current `latest` alias.
    pub fn latest_path(&self) -> PathBuf {
        self.backup_dir.join(format!("{}-latest.bak", self.store_name))
    }

    /// Path of the `prev` alias (the backup before `latest`).
    pub fn prev_path(&self) -> PathBuf {
        self.backup_dir.join(format!("{}-prev.bak", self.store_name))
    }

    /// Take a labeled, timestamped backup and rotate the alias pair.
    ///
    /// Returns `Ok(None)` when the store file does not exist yet —
    /// an explicit "nothing to back up" signal, not an error.
    pub fn create_backup(&self, label: &str) -> Result<Option<PathBuf>, BackupError> {
        if !self.store_path.exists() {
            info!(store = %self.store_path.display(), "no store file yet, nothing to back up");
            return Ok(None);
        }
        fs::create_dir_all(&self.backup_dir).map_err(|e| io_err(&self.backup_dir, e))?;

        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let suffix = if label.is_empty() {
            String::new()
        } else {
            format!("-{label}")
        };
        let stem = format!("{}{}-{}", self.store_name, suffix, timestamp);

        // Same label within one timestamp tick must not overwrite the
        // earlier labeled copy; every call gets its own file.
        let mut target = self.backup_dir.join(format!("{stem}.bak"));
        let mut attempt = 1;
        while target.exists() {
            attempt += 1;
            target = self.backup_dir.join(format!("{stem}-{attempt}.bak"));
        }

        fs::copy(&self.store_path, &target).map_err(|e| io_err(&target, e))?;

        // Rotate latest -> prev so the two most recent copies are always
        // addressable without a directory scan.
        let latest = self.latest_path();
        let prev = self.prev_path();
        if latest.exists() {
            fs::rename(&latest, &prev).map_err(|e| io_err(&prev, e))?;
        }
        fs::copy(&self.store_path, &latest).map_err(|e| io_err(&latest, e))?;

        info!(backup = %target.display(), "store backup created");
        Ok(Some(target))
    }

    /// All backup files, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, BackupError> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.backup_dir).map_err(|e| io_err(&self.backup_dir, e))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&self.backup_dir, e))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "bak") {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .map_err(|e| io_err(&path, e))?;
                backups.push((modified, path));
            }
        }
        backups.sort_by(|a, b| b.cmp(a));
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    /// Overwrite the live store with a selected backup.
    pub fn restore_backup(&self, selected: &Path) -> Result<(), BackupError> {
        if !selected.exists() {
            warn!(backup = %selected.display(), "restore requested for missing backup");
            return Err(BackupError::NotFound {
                path: selected.display().to_string(),
            });
        }
        fs::copy(selected, &self.store_path).map_err(|e| io_err(&self.store_path, e))?;
        info!(backup = %selected.display(), "store restored from backup");
        Ok(())
    }
}
