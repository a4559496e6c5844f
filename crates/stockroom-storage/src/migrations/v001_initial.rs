//! V001: Initial schema.
//! products, movements, raw_snapshots, pending_edits.

pub const MIGRATION_SQL: &str = r#"
-- Legacy normalized product rows for list views. Kept in step by
-- pull/import so display surfaces never parse the raw JSON blobs.
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    sku TEXT UNIQUE,
    remote_id INTEGER UNIQUE,
    cost REAL,
    price REAL,
    quantity INTEGER NOT NULL DEFAULT 0,
    active INTEGER NOT NULL DEFAULT 1
) STRICT;

CREATE INDEX IF NOT EXISTS idx_products_remote_id
    ON products(remote_id) WHERE remote_id IS NOT NULL;

-- Append-only quantity ledger. Rows are never updated or deleted;
-- the sum of changes per product reconciles with products.quantity.
CREATE TABLE IF NOT EXISTS movements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL REFERENCES products(id),
    change INTEGER NOT NULL,
    source TEXT NOT NULL,
    note TEXT,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_movements_product
    ON movements(product_id);

-- Last-fetched full remote representation, one row per remote id.
-- The diffing baseline for pending edits.
CREATE TABLE IF NOT EXISTS raw_snapshots (
    remote_id INTEGER PRIMARY KEY,
    raw TEXT NOT NULL,
    fetched_at INTEGER NOT NULL
) STRICT;

-- Sparse pending edits, one row per remote id with at least one
-- deviating field. A row with zero keys is never persisted.
CREATE TABLE IF NOT EXISTS pending_edits (
    remote_id INTEGER PRIMARY KEY,
    edits TEXT NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;
"#;
