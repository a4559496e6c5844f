//! Tests for the movement ledger: append-only deltas that keep the
//! product quantity reconciled.

use stockroom_storage::queries::movements::{
    query_recent, record_movement, total_change, MovementSource,
};
use stockroom_storage::queries::products::{self, ProductUpsert};
use stockroom_storage::StoreManager;

fn setup_product(store: &StoreManager, name: &str, quantity: i64) -> i64 {
    store
        .with_conn(|conn| {
            products::upsert(
                conn,
                &ProductUpsert {
                    name,
                    quantity: Some(quantity),
                    ..Default::default()
                },
            )
        })
        .unwrap()
}

#[test]
fn movement_updates_product_quantity() {
    let store = StoreManager::open_in_memory().unwrap();
    let id = setup_product(&store, "Kede", 10);

    store
        .with_conn(|conn| {
            record_movement(conn, id, -3, MovementSource::Manual, Some("sold"))?;
            record_movement(conn, id, 5, MovementSource::CatalogPull, None)?;

            let product = products::get_by_normalized_name(conn, "kede")?.unwrap();
            assert_eq!(product.quantity, 12);
            assert_eq!(total_change(conn, id)?, 2);
            Ok(())
        })
        .unwrap();
}

#[test]
fn zero_change_is_a_noop() {
    let store = StoreManager::open_in_memory().unwrap();
    let id = setup_product(&store, "Lova", 4);

    store
        .with_conn(|conn| {
            record_movement(conn, id, 0, MovementSource::Manual, None)?;
            assert!(query_recent(conn, 10)?.is_empty());
            assert_eq!(total_change(conn, id)?, 0);
            Ok(())
        })
        .unwrap();
}

#[test]
fn recent_movements_are_newest_first_with_product_names() {
    let store = StoreManager::open_in_memory().unwrap();
    let a = setup_product(&store, "Spinta", 1);
    let b = setup_product(&store, "Stalas", 1);

    store
        .with_conn(|conn| {
            record_movement(conn, a, 1, MovementSource::Manual, None)?;
            record_movement(conn, b, 2, MovementSource::Reconciliation, Some("sync"))?;
            record_movement(conn, a, 3, MovementSource::CatalogPull, None)?;

            let recent = query_recent(conn, 2)?;
            assert_eq!(recent.len(), 2);
            assert_eq!(recent[0].change, 3);
            assert_eq!(recent[0].product_name, "Spinta");
            assert_eq!(recent[1].change, 2);
            assert_eq!(recent[1].product_name, "Stalas");
            assert_eq!(recent[1].source, "reconciliation");
            Ok(())
        })
        .unwrap();
}
