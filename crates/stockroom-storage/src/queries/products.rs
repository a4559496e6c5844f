//! Queries for the legacy products table — the normalized list view.

use rusqlite::{params, Connection, OptionalExtension};
use stockroom_core::errors::StorageError;

use super::sql_err;

/// A product list-view row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub remote_id: Option<i64>,
    pub cost: Option<f64>,
    pub price: Option<f64>,
    pub quantity: i64,
    pub active: bool,
}

/// Incoming product fields for an upsert. `None` fields leave the
/// existing value untouched — imports are non-destructive.
#[derive(Debug, Clone, Default)]
pub struct ProductUpsert<'a> {
    pub name: &'a str,
    pub sku: Option<&'a str>,
    pub remote_id: Option<i64>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub active: Option<bool>,
}

fn row_from(row: &rusqlite::Row<'_>) -> Result<ProductRow, rusqlite::Error> {
    Ok(ProductRow {
        id: row.get(0)?,
        name: row.get(1)?,
        sku: row.get(2)?,
        remote_id: row.get(3)?,
        cost: row.get(4)?,
        price: row.get(5)?,
        quantity: row.get(6)?,
        active: row.get::<_, i64>(7)? != 0,
    })
}

const COLS: &str = "id, name, sku, remote_id, cost, price, quantity, active";

/// Fetch a product by remote id.
pub fn get_by_remote_id(conn: &Connection, remote_id: i64) -> Result<Option<ProductRow>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {COLS} FROM products WHERE remote_id = ?1"
    ))
    .map_err(sql_err)?
    .query_row(params![remote_id], row_from)
    .optional()
    .map_err(sql_err)
}

/// Fetch a product by whitespace-collapsed, case-folded name.
pub fn get_by_normalized_name(conn: &Connection, name: &str) -> Result<Option<ProductRow>, StorageError> {
    let wanted = normalize_name(name);
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {COLS} FROM products"))
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], row_from)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(rows.into_iter().find(|p| normalize_name(&p.name) == wanted))
}

/// All active products, ordered by name.
pub fn list_active(conn: &Connection) -> Result<Vec<ProductRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLS} FROM products WHERE active = 1 ORDER BY name"
        ))
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], row_from)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(rows)
}

/// Insert or update a product, matching by remote id first and falling
/// back to the normalized name. Returns the row id. Only fields the
/// caller provides overwrite existing values; a blank incoming name
/// never clobbers a real one.
pub fn upsert(conn: &Connection, incoming: &ProductUpsert<'_>) -> Result<i64, StorageError> {
    let name = incoming.name.trim();
    if name.is_empty() {
        return Err(StorageError::SqliteError {
            message: "product upsert requires a non-empty name".to_string(),
        });
    }

    let existing = match incoming.remote_id {
        Some(remote_id) => get_by_remote_id(conn, remote_id)?,
        None => None,
    };
    let existing = match existing {
        Some(p) => Some(p),
        None => get_by_normalized_name(conn, name)?,
    };

    match existing {
        Some(p) => {
            let sku = incoming
                .sku
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or(p.sku);
            conn.prepare_cached(
                "UPDATE products SET
                    name = ?2, sku = ?3, remote_id = COALESCE(?4, remote_id),
                    price = COALESCE(?5, price), quantity = COALESCE(?6, quantity),
                    active = COALESCE(?7, active)
                 WHERE id = ?1",
            )
            .map_err(sql_err)?
            .execute(params![
                p.id,
                name,
                sku,
                incoming.remote_id,
                incoming.price,
                incoming.quantity,
                incoming.active.map(i64::from),
            ])
            .map_err(sql_err)?;
            Ok(p.id)
        }
        None => {
            conn.prepare_cached(
                "INSERT INTO products (name, sku, remote_id, price, quantity, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(sql_err)?
            .execute(params![
                name,
                incoming.sku.map(str::trim).filter(|s| !s.is_empty()),
                incoming.remote_id,
                incoming.price,
                incoming.quantity.unwrap_or(0),
                i64::from(incoming.active.unwrap_or(true)),
            ])
            .map_err(sql_err)?;
            Ok(conn.last_insert_rowid())
        }
    }
}

/// Collapse whitespace and casefold for fallback name matching.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
