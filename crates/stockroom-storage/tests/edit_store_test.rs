//! Tests for the Local Edit Store: diff-against-baseline retention,
//! empty-set deletion, and confirmed-key clearing.

use serde_json::json;
use stockroom_storage::queries::snapshots;
use stockroom_storage::{clear_edits, get_pending, set_edit, EditOutcome, StoreManager};

fn setup_store() -> StoreManager {
    StoreManager::open_in_memory().unwrap()
}

#[test]
fn deviating_value_is_retained() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            snapshots::upsert_snapshot(conn, 5, &json!({"regular_price": "10.00"}))?;
            let outcome = set_edit(conn, 5, "regular_price", &json!("12.50"))?;
            assert_eq!(outcome, EditOutcome::Retained);

            let pending = get_pending(conn, 5)?.unwrap();
            assert_eq!(pending.get("regular_price"), Some(&json!(12.5)));
            Ok(())
        })
        .unwrap();
}

#[test]
fn value_equal_to_baseline_is_never_stored() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            snapshots::upsert_snapshot(conn, 5, &json!({"regular_price": "10.00"}))?;
            // Same value, different surface representation.
            let outcome = set_edit(conn, 5, "regular_price", &json!("10,00"))?;
            assert_eq!(outcome, EditOutcome::Removed);
            assert_eq!(get_pending(conn, 5)?, None);
            Ok(())
        })
        .unwrap();
}

#[test]
fn reverting_an_edit_to_baseline_removes_it() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            snapshots::upsert_snapshot(conn, 5, &json!({"name": "Stalas"}))?;
            set_edit(conn, 5, "name", &json!("Naujas stalas"))?;
            assert!(get_pending(conn, 5)?.is_some());

            // User types the original value back in.
            set_edit(conn, 5, "name", &json!("Stalas"))?;
            assert_eq!(get_pending(conn, 5)?, None);
            Ok(())
        })
        .unwrap();
}

#[test]
fn absent_input_removes_the_key() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            snapshots::upsert_snapshot(conn, 5, &json!({"purchase_note": "old"}))?;
            set_edit(conn, 5, "purchase_note", &json!("new note"))?;
            let outcome = set_edit(conn, 5, "purchase_note", &json!("   "))?;
            assert_eq!(outcome, EditOutcome::Removed);
            assert_eq!(get_pending(conn, 5)?, None);
            Ok(())
        })
        .unwrap();
}

#[test]
fn edit_without_snapshot_is_retained() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            // No baseline at all: any real value deviates.
            let outcome = set_edit(conn, 9, "stock_quantity", &json!("7"))?;
            assert_eq!(outcome, EditOutcome::Retained);
            let pending = get_pending(conn, 9)?.unwrap();
            assert_eq!(pending.get("stock_quantity"), Some(&json!(7)));
            Ok(())
        })
        .unwrap();
}

#[test]
fn unknown_field_is_rejected() {
    let store = setup_store();
    let err = store
        .with_conn(|conn| set_edit(conn, 5, "made_up_field", &json!("x")))
        .unwrap_err();
    assert!(err.to_string().contains("made_up_field"));
}

#[test]
fn clear_edits_removes_exactly_the_listed_keys() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            set_edit(conn, 5, "regular_price", &json!("12.50"))?;
            set_edit(conn, 5, "stock_quantity", &json!(7))?;
            set_edit(conn, 5, "purchase_note", &json!("pastaba"))?;

            clear_edits(
                conn,
                5,
                &["regular_price".to_string(), "stock_quantity".to_string()],
            )?;
            let pending = get_pending(conn, 5)?.unwrap();
            assert_eq!(pending.len(), 1);
            assert!(pending.contains_key("purchase_note"));
            Ok(())
        })
        .unwrap();
}

#[test]
fn clearing_the_last_key_deletes_the_row() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            set_edit(conn, 5, "regular_price", &json!("12.50"))?;
            clear_edits(conn, 5, &["regular_price".to_string()])?;
            assert_eq!(get_pending(conn, 5)?, None);
            Ok(())
        })
        .unwrap();
}

#[test]
fn clear_on_unknown_item_is_a_noop() {
    let store = setup_store();
    store
        .with_conn(|conn| clear_edits(conn, 404, &["name".to_string()]))
        .unwrap();
}

#[test]
fn dotted_field_diffs_against_nested_baseline() {
    let store = setup_store();
    store
        .with_conn(|conn| {
            snapshots::upsert_snapshot(conn, 5, &json!({"dimensions": {"length": "30"}}))?;
            let outcome = set_edit(conn, 5, "dimensions.length", &json!("30.0"))?;
            assert_eq!(outcome, EditOutcome::Removed);

            let outcome = set_edit(conn, 5, "dimensions.length", &json!("31"))?;
            assert_eq!(outcome, EditOutcome::Retained);
            Ok(())
        })
        .unwrap();
}
