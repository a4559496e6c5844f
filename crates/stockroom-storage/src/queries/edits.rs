//! Queries for the pending_edits table — sparse per-item edit blobs.
//!
//! Blob-level CRUD only; the diff-against-baseline rule lives in
//! `edit_store`. An empty map is never written: writers delete instead.

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value as Json};
use stockroom_core::errors::StorageError;

use super::{now_epoch, sql_err};

/// Fetch the pending edit map for a remote id.
pub fn get_edits(
    conn: &Connection,
    remote_id: i64,
) -> Result<Option<Map<String, Json>>, StorageError> {
    let blob: Option<String> = conn
        .prepare_cached("SELECT edits FROM pending_edits WHERE remote_id = ?1")
        .map_err(sql_err)?
        .query_row(params![remote_id], |row| row.get(0))
        .optional()
        .map_err(sql_err)?;

    match blob {
        None => Ok(None),
        Some(blob) => match serde_json::from_str::<Json>(&blob) {
            Ok(Json::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(StorageError::InvalidBlob {
                remote_id,
                message: "pending edits blob is not an object".to_string(),
            }),
            Err(e) => Err(StorageError::InvalidBlob {
                remote_id,
                message: e.to_string(),
            }),
        },
    }
}

/// Write the pending edit map for a remote id. An empty map deletes
/// the row — zero pending keys must not persist as a distinct entity.
pub fn put_edits(
    conn: &Connection,
    remote_id: i64,
    edits: &Map<String, Json>,
) -> Result<(), StorageError> {
    if edits.is_empty() {
        return delete_edits(conn, remote_id);
    }
    let blob = Json::Object(edits.clone()).to_string();
    conn.prepare_cached(
        "INSERT INTO pending_edits (remote_id, edits, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(remote_id) DO UPDATE SET edits = ?2, updated_at = ?3",
    )
    .map_err(sql_err)?
    .execute(params![remote_id, blob, now_epoch()])
    .map_err(sql_err)?;
    Ok(())
}

/// Remove the pending edit row for a remote id, if present.
pub fn delete_edits(conn: &Connection, remote_id: i64) -> Result<(), StorageError> {
    conn.prepare_cached("DELETE FROM pending_edits WHERE remote_id = ?1")
        .map_err(sql_err)?
        .execute(params![remote_id])
        .map_err(sql_err)?;
    Ok(())
}

/// All pending edit sets, ordered by remote id.
pub fn list_pending(conn: &Connection) -> Result<Vec<(i64, Map<String, Json>)>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT remote_id, edits FROM pending_edits ORDER BY remote_id")
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(sql_err)?
        .collect::<Result<Vec<(i64, String)>, _>>()
        .map_err(sql_err)?;

    let mut out = Vec::with_capacity(rows.len());
    for (remote_id, blob) in rows {
        match serde_json::from_str::<Json>(&blob) {
            Ok(Json::Object(map)) => out.push((remote_id, map)),
            Ok(_) | Err(_) => {
                return Err(StorageError::InvalidBlob {
                    remote_id,
                    message: "pending edits blob is not an object".to_string(),
                })
            }
        }
    }
    Ok(out)
}
