//! Tests for the product list view: upsert matching and non-destructive
//! field updates.

use stockroom_storage::queries::products::{
    get_by_normalized_name, get_by_remote_id, list_active, normalize_name, upsert, ProductUpsert,
};
use stockroom_storage::StoreManager;

#[test]
fn name_normalization_collapses_whitespace_and_case() {
    assert_eq!(normalize_name("  Didelis   STALAS "), "didelis stalas");
}

#[test]
fn upsert_matches_by_remote_id_first() {
    let store = StoreManager::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            let id = upsert(
                conn,
                &ProductUpsert {
                    name: "Old name",
                    remote_id: Some(10),
                    price: Some(1.0),
                    quantity: Some(1),
                    ..Default::default()
                },
            )?;

            // Same remote id, new name: must update, not insert.
            let again = upsert(
                conn,
                &ProductUpsert {
                    name: "New name",
                    remote_id: Some(10),
                    price: Some(2.0),
                    ..Default::default()
                },
            )?;
            assert_eq!(id, again);

            let product = get_by_remote_id(conn, 10)?.unwrap();
            assert_eq!(product.name, "New name");
            assert_eq!(product.price, Some(2.0));
            // Quantity was not provided: untouched.
            assert_eq!(product.quantity, 1);
            Ok(())
        })
        .unwrap();
}

#[test]
fn upsert_falls_back_to_normalized_name() {
    let store = StoreManager::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            let id = upsert(
                conn,
                &ProductUpsert {
                    name: "Zalia lentyna",
                    ..Default::default()
                },
            )?;

            // No remote id on file yet; the import row carries one.
            let again = upsert(
                conn,
                &ProductUpsert {
                    name: "  zalia   LENTYNA ",
                    remote_id: Some(77),
                    ..Default::default()
                },
            )?;
            assert_eq!(id, again);
            assert_eq!(get_by_remote_id(conn, 77)?.unwrap().id, id);
            Ok(())
        })
        .unwrap();
}

#[test]
fn blank_sku_never_clobbers_a_real_one() {
    let store = StoreManager::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            upsert(
                conn,
                &ProductUpsert {
                    name: "Kede",
                    remote_id: Some(3),
                    sku: Some("SKU-3"),
                    ..Default::default()
                },
            )?;
            upsert(
                conn,
                &ProductUpsert {
                    name: "Kede",
                    remote_id: Some(3),
                    sku: Some("  "),
                    ..Default::default()
                },
            )?;
            assert_eq!(
                get_by_remote_id(conn, 3)?.unwrap().sku.as_deref(),
                Some("SKU-3")
            );
            Ok(())
        })
        .unwrap();
}

#[test]
fn empty_name_is_rejected() {
    let store = StoreManager::open_in_memory().unwrap();
    let err = store
        .with_conn(|conn| {
            upsert(
                conn,
                &ProductUpsert {
                    name: "   ",
                    ..Default::default()
                },
            )
        })
        .unwrap_err();
    assert!(err.to_string().contains("non-empty name"));
}

#[test]
fn list_active_filters_and_orders() {
    let store = StoreManager::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            upsert(
                conn,
                &ProductUpsert {
                    name: "B prekė",
                    ..Default::default()
                },
            )?;
            upsert(
                conn,
                &ProductUpsert {
                    name: "A prekė",
                    ..Default::default()
                },
            )?;
            upsert(
                conn,
                &ProductUpsert {
                    name: "Nebeaktyvi",
                    active: Some(false),
                    ..Default::default()
                },
            )?;

            let active = list_active(conn)?;
            let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["A prekė", "B prekė"]);
            Ok(())
        })
        .unwrap();
}

#[test]
fn lookup_by_name_uses_normalization() {
    let store = StoreManager::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            upsert(
                conn,
                &ProductUpsert {
                    name: "Didelis stalas",
                    ..Default::default()
                },
            )?;
            assert!(get_by_normalized_name(conn, " DIDELIS   stalas")?.is_some());
            assert!(get_by_normalized_name(conn, "mazas stalas")?.is_none());
            Ok(())
        })
        .unwrap();
}
