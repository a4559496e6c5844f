//! Push runner: reconcile pending edits, transmit in bounded batches,
//! commit locally only what the remote positively confirmed.

use serde_json::Value as Json;
use stockroom_core::config::SyncConfig;
use stockroom_core::errors::SyncError;
use stockroom_storage::queries::movements::{self, MovementSource};
use stockroom_storage::queries::{edits, products, snapshots};
use stockroom_storage::{edit_store, BackupManager, StoreManager};
use tracing::{info, warn};

use crate::client::CatalogTransport;
use crate::reconcile::{reconcile_item, ItemPayload};
use crate::report::{FailureReason, ItemFailure, SyncReport};

/// Reconcile and push all pending edits.
///
/// Order of operations per the backup discipline: payloads are built
/// first, and a backup is taken before the first commit can happen. A
/// failed backup aborts the run with local state untouched. A failed
/// batch fails only its own items; the run continues.
pub fn push_pending(
    store: &StoreManager,
    backup: &BackupManager,
    transport: &dyn CatalogTransport,
    config: &SyncConfig,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport {
        dry_run: config.dry_run,
        ..Default::default()
    };

    // 1. Reconcile every pending item into payloads + validation failures.
    let pending = store.with_conn(edits::list_pending)?;
    let allowed = config.allowed_id_set();

    let mut payloads: Vec<ItemPayload> = Vec::new();
    for (remote_id, edit_map) in &pending {
        if let Some(allowed) = &allowed {
            if !allowed.contains(remote_id) {
                continue;
            }
        }
        let snapshot = store.with_conn(|conn| snapshots::get_snapshot(conn, *remote_id))?;
        let outcome = reconcile_item(*remote_id, edit_map, snapshot.as_ref());
        report.failures.extend(outcome.failures);
        if let Some(payload) = outcome.payload {
            payloads.push(payload);
        }
    }
    report.prepared = payloads.len();

    if payloads.is_empty() {
        info!("nothing to push");
        return Ok(report);
    }

    if config.dry_run {
        info!(prepared = report.prepared, "dry run: payloads built, nothing transmitted");
        return Ok(report);
    }

    // 2. Backup before the first possible local mutation.
    store.checkpoint()?;
    backup.create_backup("before_push")?;

    // 3. Transmit batch by batch.
    for batch in payloads.chunks(config.effective_batch_size()) {
        let bodies: Vec<Json> = batch
            .iter()
            .map(|p| Json::Object(p.body.clone()))
            .collect();

        let response = match transport.update_batch(&bodies) {
            Ok(response) => response,
            Err(e) => {
                // Whole batch lost in transit: every item stays pending.
                warn!(size = batch.len(), error = %e, "batch transport failure");
                for payload in batch {
                    report.failures.push(ItemFailure::new(
                        payload.remote_id,
                        FailureReason::Transport,
                        e.to_string(),
                    ));
                }
                continue;
            }
        };

        for payload in batch {
            match response.result_for(payload.remote_id) {
                None => {
                    report.failures.push(ItemFailure::new(
                        payload.remote_id,
                        FailureReason::Unconfirmed,
                        "item missing from batch response",
                    ));
                }
                Some(result) => match &result.error {
                    Some(error) if error.is_not_found() => {
                        info!(remote_id = payload.remote_id, "product gone upstream, skipping");
                        report.failures.push(ItemFailure::new(
                            payload.remote_id,
                            FailureReason::NotFound,
                            error.describe(),
                        ));
                    }
                    Some(error) => {
                        report.failures.push(ItemFailure::new(
                            payload.remote_id,
                            FailureReason::Remote,
                            error.describe(),
                        ));
                    }
                    None => {
                        commit_confirmed(store, payload)?;
                        report.confirmed += 1;
                    }
                },
            }
        }
    }

    info!(
        confirmed = report.confirmed,
        failed = report.failures.len(),
        "push run finished"
    );
    Ok(report)
}

/// Commit one confirmed item in a single transaction: merge the sent
/// fields into the snapshot baseline, clear exactly those keys from
/// the edit store, and ledger any quantity change.
fn commit_confirmed(store: &StoreManager, payload: &ItemPayload) -> Result<(), SyncError> {
    store.with_transaction(|tx| {
        let sent_quantity = payload
            .body
            .get("stock_quantity")
            .and_then(Json::as_i64);
        if let Some(new_quantity) = sent_quantity {
            if let Some(product) = products::get_by_remote_id(tx, payload.remote_id)? {
                movements::record_movement(
                    tx,
                    product.id,
                    new_quantity - product.quantity,
                    MovementSource::Reconciliation,
                    Some("confirmed by catalog sync"),
                )?;
            }
        }

        snapshots::merge_confirmed_fields(tx, payload.remote_id, &payload.body)?;
        edit_store::clear_edits(tx, payload.remote_id, &payload.keys)?;
        Ok(())
    })?;
    Ok(())
}
