//! # stockroom-storage
//!
//! SQLite persistence for the stockroom engine: the raw catalog
//! snapshot cache, the sparse pending-edit store, the append-only
//! movement ledger, the legacy product list view, and the backup /
//! restore manager.

pub mod backup;
pub mod connection;
pub mod edit_store;
pub mod migrations;
pub mod queries;

pub use backup::BackupManager;
pub use connection::StoreManager;
pub use edit_store::{clear_edits, get_pending, set_edit, EditOutcome};
