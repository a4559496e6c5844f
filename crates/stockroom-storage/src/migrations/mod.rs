//! Schema migrations, versioned via `PRAGMA user_version`.

pub mod v001_initial;

use rusqlite::Connection;
use stockroom_core::errors::StorageError;

/// Ordered list of (version, migration SQL).
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Run all pending migrations. Each migration runs in its own
/// transaction together with the user_version bump.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        let script = format!("BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;");
        conn.execute_batch(&script)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        tracing::debug!(version, "applied store migration");
    }
    Ok(())
}
