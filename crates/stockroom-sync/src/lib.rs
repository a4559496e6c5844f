//! # stockroom-sync
//!
//! Turns pending local edits into validated wire payloads, pushes them
//! to the remote catalog in bounded batches, and commits local state
//! only on positive per-item confirmation. Also hosts the full-catalog
//! pull that refreshes the raw snapshot baseline.

pub mod client;
pub mod pull;
pub mod push;
pub mod reconcile;
pub mod report;

pub use client::{CatalogTransport, HttpCatalogClient};
pub use pull::{pull_catalog, PullReport};
pub use push::push_pending;
pub use report::{FailureReason, ItemFailure, SyncReport};
