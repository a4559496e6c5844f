//! Run reports: per-item failures with reasons, never silently dropped.

use serde::Serialize;

/// Why one item could not be (fully) synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Effective sale price exceeded effective regular price; the
    /// price sub-group was dropped from the edit set.
    PriceOrder,
    /// Quantity edit without stock tracking enabled; the quantity
    /// field was dropped from the edit set.
    StockGate,
    /// The whole batch failed at the transport level; nothing about
    /// this item reached the remote.
    Transport,
    /// The remote rejected this specific item.
    Remote,
    /// The remote response did not mention this item at all. No news
    /// is not good news: treated exactly like a failure.
    Unconfirmed,
    /// The remote id no longer exists upstream; a recoverable skip.
    NotFound,
}

/// One item's failure, surfaced to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub remote_id: i64,
    pub reason: FailureReason,
    pub detail: String,
}

impl ItemFailure {
    pub fn new(remote_id: i64, reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            remote_id,
            reason,
            detail: detail.into(),
        }
    }
}

/// Outcome of a push run. `confirmed` counts only items the remote
/// positively acknowledged; everything else is in `failures`.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    /// Items confirmed by the remote and committed locally.
    pub confirmed: usize,
    /// Payloads built by the reconciliation engine (what a live run
    /// would send; the only populated counter in dry-run mode).
    pub prepared: usize,
    /// Per-item failures: validation drops, transport, remote errors,
    /// unconfirmed items, not-found skips.
    pub failures: Vec<ItemFailure>,
    /// True when the run built payloads but did not transmit.
    pub dry_run: bool,
}

impl SyncReport {
    /// True when every prepared item was confirmed and no validation
    /// rule fired.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
