//! Tests for the field registry: alias resolution, nested keys,
//! present-null vs absent, and spreadsheet-header matching.

use serde_json::json;
use stockroom_core::fields::{match_column, resolve, spec_for, EDIT_FIELDS};
use stockroom_core::FieldType;

#[test]
fn canonical_key_wins_over_alias() {
    let raw = json!({"regular_price": "10.00", "Reguliari kaina": "99.00"});
    assert_eq!(
        resolve(&raw, "regular_price"),
        Some(&json!("10.00"))
    );
}

#[test]
fn aliases_tried_in_declared_order() {
    let raw = json!({"Pastaba": "first", "comment": "later"});
    // purchase_note aliases: Komentaras, Komentarai, Pastaba, Pastabos, comment
    assert_eq!(resolve(&raw, "purchase_note"), Some(&json!("first")));
}

#[test]
fn present_null_is_distinct_from_absent() {
    let raw = json!({"sale_price": null});
    assert_eq!(resolve(&raw, "sale_price"), Some(&serde_json::Value::Null));
    assert_eq!(resolve(&raw, "regular_price"), None);
}

#[test]
fn dotted_keys_resolve_through_sub_mapping() {
    let raw = json!({"dimensions": {"length": "12.5", "width": null}});
    assert_eq!(resolve(&raw, "dimensions.length"), Some(&json!("12.5")));
    assert_eq!(
        resolve(&raw, "dimensions.width"),
        Some(&serde_json::Value::Null)
    );
    assert_eq!(resolve(&raw, "dimensions.height"), None);
}

#[test]
fn dotted_key_falls_back_to_flat_alias() {
    // Spreadsheet-sourced records carry the alias as a flat column.
    let raw = json!({"Ilgis": "30"});
    assert_eq!(resolve(&raw, "dimensions.length"), Some(&json!("30")));
}

#[test]
fn resolve_on_non_object_is_absent() {
    assert_eq!(resolve(&json!("scalar"), "name"), None);
    assert_eq!(resolve(&serde_json::Value::Null, "name"), None);
}

#[test]
fn spec_lookup_knows_every_declared_field() {
    for spec in EDIT_FIELDS {
        let found = spec_for(spec.key).expect("declared field resolvable");
        assert_eq!(found.key, spec.key);
    }
    assert!(spec_for("nonexistent_field").is_none());
}

#[test]
fn header_matching_survives_case_diacritics_and_punctuation() {
    assert_eq!(match_column("Reguliari kaina").map(|s| s.key), Some("regular_price"));
    assert_eq!(match_column("reguliari-kaina").map(|s| s.key), Some("regular_price"));
    assert_eq!(match_column("REGULIARI KAINA ").map(|s| s.key), Some("regular_price"));
    assert_eq!(match_column("Aprasymas").map(|s| s.key), Some("description"));
    assert_eq!(match_column("Aukštis").map(|s| s.key), Some("dimensions.height"));
    assert_eq!(match_column("aukstis").map(|s| s.key), Some("dimensions.height"));
}

#[test]
fn header_matching_rejects_unknown_and_empty() {
    assert!(match_column("Visiškai kita").is_none());
    assert!(match_column("").is_none());
    assert!(match_column("---").is_none());
}

#[test]
fn stock_quantity_is_an_int_field() {
    assert_eq!(spec_for("stock_quantity").map(|s| s.ty), Some(FieldType::Int));
    assert_eq!(spec_for("manage_stock").map(|s| s.ty), Some(FieldType::Bool));
}
