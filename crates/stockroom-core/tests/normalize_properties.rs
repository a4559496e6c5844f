//! Property tests: normalization idempotence and round-trip laws.

use proptest::prelude::*;
use stockroom_core::fields::{denormalize, normalize, normalize_str};
use stockroom_core::{FieldType, FieldValue};

proptest! {
    /// Normalizing a canonical JSON form is a fixed point, for every type.
    #[test]
    fn canonical_json_is_a_fixed_point(value in arb_field_value()) {
        let canonical = value.to_canonical_json();
        prop_assert_eq!(normalize(value.field_type(), &canonical), Some(value));
    }

    /// Display round-trip: any valid value renders to a display string
    /// that re-normalizes to the same value.
    #[test]
    fn display_round_trip(value in arb_field_value()) {
        let display = denormalize(&value);
        prop_assert_eq!(normalize_str(value.field_type(), &display), Some(value));
    }

    /// Decimal parsing never panics and never produces non-finite values.
    #[test]
    fn price_parsing_total(input in ".{0,32}") {
        if let Some(FieldValue::Price(v)) = normalize_str(FieldType::Price, &input) {
            prop_assert!(v.is_finite());
        }
    }

    /// Unrecognized boolean tokens are absent, never false.
    #[test]
    fn bool_never_defaults(input in "[a-z]{2,8}") {
        let known = ["true", "yes", "taip", "false", "no", "ne", "y", "n"];
        prop_assume!(!known.contains(&input.as_str()));
        prop_assert_eq!(normalize_str(FieldType::Bool, &input), None);
    }
}

/// Values drawn so that their display form is lossless: prices and
/// floats limited to two decimals, dates to whole days (the display
/// form of a date drops the time component by design).
fn arb_field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9 ]{0,18}[A-Za-z0-9]".prop_map(FieldValue::Text),
        (0i64..1_000_000).prop_map(|cents| FieldValue::Price(cents as f64 / 100.0)),
        any::<i32>().prop_map(|v| FieldValue::Int(v as i64)),
        (-1_000_000i64..1_000_000).prop_map(|h| FieldValue::Float(h as f64 / 4.0)),
        any::<bool>().prop_map(FieldValue::Bool),
        (0i64..20_000).prop_map(|days| {
            let date = chrono::NaiveDate::from_ymd_opt(1990, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(days as u64))
                .unwrap();
            FieldValue::Date(date.and_hms_opt(0, 0, 0).unwrap())
        }),
    ]
}
