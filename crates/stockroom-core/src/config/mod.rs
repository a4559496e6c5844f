//! Configuration system for stockroom.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod backup_config;
pub mod remote_config;
pub mod stockroom_config;
pub mod sync_config;

pub use backup_config::BackupConfig;
pub use remote_config::RemoteConfig;
pub use stockroom_config::StockroomConfig;
pub use sync_config::SyncConfig;
