//! Sync run configuration: batch size, id allow-list, dry-run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Configuration for push/pull runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum items per batch-update call. Default: 100.
    pub batch_size: Option<u32>,
    /// Optional remote-id allow-list for selective push, as a
    /// comma/semicolon/whitespace separated string, e.g. `"1, 2;3"`.
    pub allowed_ids: Option<String>,
    /// Build payloads and report without calling the remote or
    /// mutating local state.
    pub dry_run: bool,
}

impl SyncConfig {
    /// Returns the effective batch size, defaulting to 100. Clamped to
    /// at least 1: a zero here would make batch chunking panic, and a
    /// directly-constructed config never passes validation.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.map(|n| n as usize).unwrap_or(100).max(1)
    }

    /// Parse the allow-list string into a set of remote ids.
    /// Unparseable tokens are skipped. Returns `None` when no
    /// allow-list is configured (meaning: all ids allowed); an empty
    /// string yields an empty set (meaning: nothing allowed).
    pub fn allowed_id_set(&self) -> Option<HashSet<i64>> {
        let raw = self.allowed_ids.as_deref()?;
        Some(parse_id_list(raw))
    }
}

/// Split a free-form id list on commas, semicolons, and whitespace.
pub fn parse_id_list(raw: &str) -> HashSet<i64> {
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .filter_map(|tok| tok.parse::<i64>().ok())
        .collect()
}
