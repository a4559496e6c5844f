//! Queries for the movements table — the append-only quantity ledger.

use rusqlite::{params, Connection};
use stockroom_core::errors::StorageError;

use super::{now_epoch, sql_err};

/// Where a quantity change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementSource {
    Manual,
    CatalogPull,
    Reconciliation,
}

impl MovementSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementSource::Manual => "manual",
            MovementSource::CatalogPull => "catalog_pull",
            MovementSource::Reconciliation => "reconciliation",
        }
    }
}

/// One ledger row, joined with the product name for display.
#[derive(Debug, Clone)]
pub struct MovementRow {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub change: i64,
    pub source: String,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Record a quantity movement and update the product row's quantity in
/// the same statement pair. A zero change is a no-op. Callers that
/// record several movements should wrap them in one transaction.
pub fn record_movement(
    conn: &Connection,
    product_id: i64,
    change: i64,
    source: MovementSource,
    note: Option<&str>,
) -> Result<(), StorageError> {
    if change == 0 {
        return Ok(());
    }

    conn.prepare_cached("UPDATE products SET quantity = quantity + ?2 WHERE id = ?1")
        .map_err(sql_err)?
        .execute(params![product_id, change])
        .map_err(sql_err)?;

    conn.prepare_cached(
        "INSERT INTO movements (product_id, change, source, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .map_err(sql_err)?
    .execute(params![product_id, change, source.as_str(), note, now_epoch()])
    .map_err(sql_err)?;

    Ok(())
}

/// Most recent movements, newest first, joined with product names.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<MovementRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT m.id, m.product_id, p.name, m.change, m.source, m.note, m.created_at
             FROM movements m JOIN products p ON p.id = m.product_id
             ORDER BY m.id DESC LIMIT ?1",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(MovementRow {
                id: row.get(0)?,
                product_id: row.get(1)?,
                product_name: row.get(2)?,
                change: row.get(3)?,
                source: row.get(4)?,
                note: row.get(5)?,
                created_at: row.get(6)?,
            })
        })
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(rows)
}

/// Sum of all recorded changes for a product. The eventual-consistency
/// check: this should reconcile with products.quantity.
pub fn total_change(conn: &Connection, product_id: i64) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "SELECT COALESCE(SUM(change), 0) FROM movements WHERE product_id = ?1",
    )
    .map_err(sql_err)?
    .query_row(params![product_id], |row| row.get(0))
    .map_err(sql_err)
}
