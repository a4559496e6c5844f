//! Tests for the write-transaction helper: commit, rollback, and
//! repeated use on one connection.

use stockroom_core::errors::StorageError;
use stockroom_storage::queries::products::{self, ProductUpsert};
use stockroom_storage::StoreManager;

#[test]
fn consecutive_transactions_commit_on_one_connection() {
    let store = StoreManager::open_in_memory().unwrap();

    for name in ["Stalas", "Kede", "Spinta"] {
        store
            .with_transaction(|tx| {
                products::upsert(
                    tx,
                    &ProductUpsert {
                        name,
                        ..Default::default()
                    },
                )
            })
            .unwrap();
    }

    store
        .with_conn(|conn| {
            assert_eq!(products::list_active(conn)?.len(), 3);
            Ok(())
        })
        .unwrap();
}

#[test]
fn failed_transaction_rolls_back_and_frees_the_connection() {
    let store = StoreManager::open_in_memory().unwrap();

    let err = store
        .with_transaction(|tx| {
            products::upsert(
                tx,
                &ProductUpsert {
                    name: "Lova",
                    ..Default::default()
                },
            )?;
            Err::<(), _>(StorageError::SqliteError {
                message: "boom".to_string(),
            })
        })
        .unwrap_err();
    assert!(err.to_string().contains("boom"));

    // The failed write left nothing behind and the connection is free
    // for the next transaction.
    store
        .with_transaction(|tx| {
            assert!(products::list_active(tx)?.is_empty());
            products::upsert(
                tx,
                &ProductUpsert {
                    name: "Lova",
                    ..Default::default()
                },
            )
        })
        .unwrap();

    store
        .with_conn(|conn| {
            assert_eq!(products::list_active(conn)?.len(), 1);
            Ok(())
        })
        .unwrap();
}
