//! # stockroom-core
//!
//! Foundation crate for the stockroom catalog sync engine.
//! Defines the editable-field registry, value normalization, errors,
//! and configuration. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod fields;

// Re-export the most commonly used types at the crate root.
pub use config::StockroomConfig;
pub use errors::{BackupError, ConfigError, StorageError, SyncError};
pub use fields::{FieldSpec, FieldType, FieldValue};
