//! Top-level stockroom configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BackupConfig, RemoteConfig, SyncConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STOCKROOM_*`)
/// 2. Project config (`stockroom.toml` in the store root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StockroomConfig {
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
    pub backup: BackupConfig,
}

impl StockroomConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("stockroom.toml");
        if project_config_path.exists() {
            let contents = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::ParseError {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!(path = %project_config_path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Apply `STOCKROOM_*` environment variable overrides.
    fn apply_env_overrides(config: &mut Self) {
        if let Ok(v) = std::env::var("STOCKROOM_BASE_URL") {
            config.remote.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("STOCKROOM_CONSUMER_KEY") {
            config.remote.consumer_key = Some(v);
        }
        if let Ok(v) = std::env::var("STOCKROOM_CONSUMER_SECRET") {
            config.remote.consumer_secret = Some(v);
        }
        if let Ok(v) = std::env::var("STOCKROOM_STATUS_FILTER") {
            config.remote.status_filter = Some(v);
        }
        if let Ok(v) = std::env::var("STOCKROOM_BATCH_SIZE") {
            if let Ok(n) = v.parse::<u32>() {
                config.sync.batch_size = Some(n);
            }
        }
        if let Ok(v) = std::env::var("STOCKROOM_ALLOWED_IDS") {
            config.sync.allowed_ids = Some(v);
        }
        if let Ok(v) = std::env::var("STOCKROOM_DRY_RUN") {
            config.sync.dry_run = matches!(v.trim(), "1" | "true" | "yes");
        }
        if let Ok(v) = std::env::var("STOCKROOM_BACKUP_DIR") {
            config.backup.backup_dir = Some(v);
        }
    }

    /// Validate the resolved configuration.
    fn validate(config: &Self) -> Result<(), ConfigError> {
        if let Some(n) = config.sync.batch_size {
            if n == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "sync.batch_size".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}
