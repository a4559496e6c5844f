//! The Local Edit Store: sparse per-item field edits, diffed against
//! the raw snapshot baseline.
//!
//! Core rule: only true deviations are retained. An edit whose value
//! normalizes to absent, or equals the baseline value, removes the key
//! instead of storing it — "pending changes" stays semantically equal
//! to "things that must be sent".

use rusqlite::Connection;
use serde_json::{Map, Value as Json};
use stockroom_core::errors::StorageError;
use stockroom_core::fields::{normalize, resolve, spec_for, FieldValue};

use crate::queries::{edits, snapshots};

/// What `set_edit` did with the submitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value deviates from the baseline and is now pending.
    Retained,
    /// The value was absent or matched the baseline; the key is not
    /// (or no longer) pending.
    Removed,
}

/// Submit an edit for one field of one catalog item.
///
/// The raw input may come from any surface (form field, spreadsheet
/// cell, API value); it is normalized by the field's declared type
/// before comparison.
pub fn set_edit(
    conn: &Connection,
    remote_id: i64,
    key: &str,
    raw_input: &Json,
) -> Result<EditOutcome, StorageError> {
    let spec = spec_for(key).ok_or_else(|| StorageError::UnknownField {
        key: key.to_string(),
    })?;

    let canonical = normalize(spec.ty, raw_input);
    let baseline = baseline_value(conn, remote_id, key)?;

    let mut pending = edits::get_edits(conn, remote_id)?.unwrap_or_default();

    let outcome = match canonical {
        Some(value) if Some(&value) != baseline.as_ref() => {
            pending.insert(key.to_string(), value.to_canonical_json());
            EditOutcome::Retained
        }
        _ => {
            pending.remove(key);
            EditOutcome::Removed
        }
    };

    edits::put_edits(conn, remote_id, &pending)?;
    Ok(outcome)
}

/// Remove exactly the listed keys from an item's pending set (used
/// after a confirmed sync). Deletes the row when the set empties.
pub fn clear_edits(conn: &Connection, remote_id: i64, keys: &[String]) -> Result<(), StorageError> {
    let Some(mut pending) = edits::get_edits(conn, remote_id)? else {
        return Ok(());
    };
    for key in keys {
        pending.remove(key);
    }
    edits::put_edits(conn, remote_id, &pending)
}

/// The pending edit map for an item, or `None` when nothing is pending.
pub fn get_pending(
    conn: &Connection,
    remote_id: i64,
) -> Result<Option<Map<String, Json>>, StorageError> {
    edits::get_edits(conn, remote_id)
}

/// Resolve and normalize the baseline value of a field from the item's
/// raw snapshot.
pub fn baseline_value(
    conn: &Connection,
    remote_id: i64,
    key: &str,
) -> Result<Option<FieldValue>, StorageError> {
    let Some(spec) = spec_for(key) else {
        return Ok(None);
    };
    let Some(raw) = snapshots::get_snapshot(conn, remote_id)? else {
        return Ok(None);
    };
    Ok(resolve(&raw, key).and_then(|v| normalize(spec.ty, v)))
}
