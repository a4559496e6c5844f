//! Queries for the raw_snapshots table — the diffing baseline.

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value as Json};
use stockroom_core::errors::StorageError;

use super::{now_epoch, sql_err};

/// Insert or overwrite the snapshot for a remote id.
pub fn upsert_snapshot(conn: &Connection, remote_id: i64, raw: &Json) -> Result<(), StorageError> {
    let blob = raw.to_string();
    conn.prepare_cached(
        "INSERT INTO raw_snapshots (remote_id, raw, fetched_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(remote_id) DO UPDATE SET raw = ?2, fetched_at = ?3",
    )
    .map_err(sql_err)?
    .execute(params![remote_id, blob, now_epoch()])
    .map_err(sql_err)?;
    Ok(())
}

/// Fetch the snapshot for a remote id, if any.
pub fn get_snapshot(conn: &Connection, remote_id: i64) -> Result<Option<Json>, StorageError> {
    let blob: Option<String> = conn
        .prepare_cached("SELECT raw FROM raw_snapshots WHERE remote_id = ?1")
        .map_err(sql_err)?
        .query_row(params![remote_id], |row| row.get(0))
        .optional()
        .map_err(sql_err)?;

    match blob {
        None => Ok(None),
        Some(blob) => serde_json::from_str(&blob)
            .map(Some)
            .map_err(|e| StorageError::InvalidBlob {
                remote_id,
                message: e.to_string(),
            }),
    }
}

/// All remote ids with a cached snapshot.
pub fn list_snapshot_ids(conn: &Connection) -> Result<Vec<i64>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT remote_id FROM raw_snapshots ORDER BY remote_id")
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(sql_err)?
        .collect::<Result<Vec<i64>, _>>()
        .map_err(sql_err)?;
    Ok(rows)
}

/// Merge confirmed-sent fields into the snapshot baseline.
///
/// Only called after the remote has positively acknowledged an item:
/// top-level fields overwrite, a `dimensions` object merges key-by-key
/// instead of replacing, and the `id` field is skipped. A missing
/// snapshot starts from an empty object so push-before-pull items still
/// gain a baseline.
pub fn merge_confirmed_fields(
    conn: &Connection,
    remote_id: i64,
    sent: &Map<String, Json>,
) -> Result<(), StorageError> {
    let mut raw = match get_snapshot(conn, remote_id)? {
        Some(Json::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, value) in sent {
        if key == "id" {
            continue;
        }
        if key == "dimensions" {
            if let (Some(Json::Object(existing)), Json::Object(incoming)) =
                (raw.get_mut("dimensions"), value)
            {
                for (k, v) in incoming {
                    existing.insert(k.clone(), v.clone());
                }
                continue;
            }
        }
        raw.insert(key.clone(), value.clone());
    }

    upsert_snapshot(conn, remote_id, &Json::Object(raw))
}
