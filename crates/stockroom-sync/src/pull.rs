//! Pull runner: full catalog refresh. Overwrites the raw snapshot
//! baseline, keeps the product list view in step, and ledgers every
//! observed quantity change.

use serde::Serialize;
use serde_json::Value as Json;
use stockroom_core::config::RemoteConfig;
use stockroom_core::errors::SyncError;
use stockroom_core::fields::{normalize, resolve, FieldValue};
use stockroom_core::FieldType;
use stockroom_storage::queries::movements::{self, MovementSource};
use stockroom_storage::queries::products::{self, ProductUpsert};
use stockroom_storage::queries::snapshots;
use stockroom_storage::{BackupManager, StoreManager};
use tracing::{info, warn};

use crate::client::CatalogTransport;

const PAGE_SIZE: u32 = 100;

/// Outcome of a pull run.
#[derive(Debug, Default, Serialize)]
pub struct PullReport {
    /// Products fetched from the remote listing.
    pub fetched: usize,
    /// New product rows created.
    pub created: usize,
    /// Existing product rows updated.
    pub updated: usize,
    /// Quantity movements recorded.
    pub movements: usize,
    /// Listing entries skipped for lack of a usable id or name.
    pub skipped: usize,
}

/// Refresh the local store from the remote catalog.
///
/// Destructive by design (snapshots are overwritten), so the backup is
/// mandatory: a backup failure aborts the pull before any mutation.
pub fn pull_catalog(
    store: &StoreManager,
    backup: &BackupManager,
    transport: &dyn CatalogTransport,
    remote: &RemoteConfig,
) -> Result<PullReport, SyncError> {
    store.checkpoint()?;
    backup.create_backup("before_pull")?;

    let mut report = PullReport::default();
    let status = remote.status_filter.as_deref();

    let mut page = 1;
    loop {
        let items = transport.list_products(page, PAGE_SIZE, status)?;
        if items.is_empty() {
            break;
        }
        report.fetched += items.len();

        for item in &items {
            ingest_item(store, item, &mut report)?;
        }
        page += 1;
    }

    info!(
        fetched = report.fetched,
        created = report.created,
        updated = report.updated,
        movements = report.movements,
        "catalog pull finished"
    );
    Ok(report)
}

/// Fold one listed product into the store: snapshot overwrite, product
/// row upsert, movement for any quantity delta.
fn ingest_item(store: &StoreManager, item: &Json, report: &mut PullReport) -> Result<(), SyncError> {
    let Some(remote_id) = item.get("id").and_then(Json::as_i64) else {
        warn!("listing entry without numeric id, skipping");
        report.skipped += 1;
        return Ok(());
    };
    let name = match resolve(item, "name").and_then(|v| normalize(FieldType::Text, v)) {
        Some(FieldValue::Text(name)) => name,
        _ => {
            warn!(remote_id, "listing entry without a name, skipping");
            report.skipped += 1;
            return Ok(());
        }
    };

    let price = resolve(item, "regular_price")
        .and_then(|v| normalize(FieldType::Price, v))
        .or_else(|| {
            item.get("price")
                .and_then(|v| normalize(FieldType::Price, v))
        })
        .and_then(|v| match v {
            FieldValue::Price(p) => Some(p),
            _ => None,
        });
    let quantity = resolve(item, "stock_quantity")
        .and_then(|v| normalize(FieldType::Int, v))
        .and_then(|v| match v {
            FieldValue::Int(q) => Some(q),
            _ => None,
        });
    let sku = item
        .get("sku")
        .and_then(Json::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let active = item
        .get("status")
        .and_then(Json::as_str)
        .map(|s| matches!(s, "publish" | "published"));

    let (created, quantity_delta) = store.with_transaction(|tx| {
        let existing = products::get_by_remote_id(tx, remote_id)?;
        let created = existing.is_none();

        let old_quantity = existing.as_ref().map(|p| p.quantity);
        let product_id = products::upsert(
            tx,
            &ProductUpsert {
                name: &name,
                sku,
                remote_id: Some(remote_id),
                price,
                // Quantity flows through the movement ledger below, so
                // here it only seeds brand-new rows.
                quantity: if created { quantity } else { None },
                active,
            },
        )?;

        let quantity_delta = match (old_quantity, quantity) {
            (Some(old), Some(new)) if new != old => {
                movements::record_movement(
                    tx,
                    product_id,
                    new - old,
                    MovementSource::CatalogPull,
                    Some("updated from catalog pull"),
                )?;
                true
            }
            _ => false,
        };

        snapshots::upsert_snapshot(tx, remote_id, item)?;
        Ok((created, quantity_delta))
    })?;

    if created {
        report.created += 1;
    } else {
        report.updated += 1;
    }
    if quantity_delta {
        report.movements += 1;
    }
    Ok(())
}
