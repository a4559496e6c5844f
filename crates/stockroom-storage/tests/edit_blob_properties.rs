//! Property tests for the pending-edit blob round-trip.

use proptest::prelude::*;
use serde_json::{Map, Value as Json};
use stockroom_storage::queries::edits;
use stockroom_storage::StoreManager;

fn arb_edit_map() -> impl Strategy<Value = Map<String, Json>> {
    let value = prop_oneof![
        "[a-zA-Z0-9 ]{0,20}".prop_map(Json::String),
        any::<i64>().prop_map(|n| Json::Number(n.into())),
        any::<bool>().prop_map(Json::Bool),
    ];
    proptest::collection::btree_map("[a-z_.]{1,24}", value, 0..8)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever map goes in comes back out byte-for-byte, and an empty
    /// map never leaves a row behind.
    #[test]
    fn edit_blob_round_trips(edit_map in arb_edit_map(), remote_id in 1i64..10_000) {
        let store = StoreManager::open_in_memory().unwrap();
        let stored = store
            .with_conn(|conn| {
                edits::put_edits(conn, remote_id, &edit_map)?;
                edits::get_edits(conn, remote_id)
            })
            .unwrap();
        if edit_map.is_empty() {
            prop_assert!(stored.is_none());
        } else {
            prop_assert_eq!(stored.as_ref(), Some(&edit_map));
        }
    }

    /// Overwriting with an empty map is equivalent to deletion.
    #[test]
    fn emptied_blob_deletes_the_row(edit_map in arb_edit_map(), remote_id in 1i64..10_000) {
        prop_assume!(!edit_map.is_empty());
        let store = StoreManager::open_in_memory().unwrap();
        let (stored, pending) = store
            .with_conn(|conn| {
                edits::put_edits(conn, remote_id, &edit_map)?;
                edits::put_edits(conn, remote_id, &Map::new())?;
                Ok((edits::get_edits(conn, remote_id)?, edits::list_pending(conn)?))
            })
            .unwrap();
        prop_assert!(stored.is_none());
        prop_assert!(pending.is_empty());
    }
}
