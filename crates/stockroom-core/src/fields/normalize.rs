//! Bidirectional conversion between raw/display representations and
//! canonical typed values, per declared field type.
//!
//! Normalization is idempotent: feeding a canonical JSON value back in
//! returns the same `FieldValue`. A parse failure is always `None`
//! (absent), never a default — absent means "do not change this field".

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as Json;

use super::value::{
    format_price, FieldType, FieldValue, DATE_DISPLAY_FORMAT, DATE_WIRE_FORMAT,
};

/// Truthy tokens, lowercase. Includes the localized affirmative.
const TRUTHY: &[&str] = &["1", "true", "yes", "y", "taip"];
/// Falsy tokens, lowercase. Anything outside both sets is absent.
const FALSY: &[&str] = &["0", "false", "no", "n", "ne"];

/// Normalize a raw JSON value into a canonical typed value.
pub fn normalize(ty: FieldType, raw: &Json) -> Option<FieldValue> {
    match raw {
        Json::Null => None,
        Json::String(s) => normalize_str(ty, s),
        Json::Bool(b) => match ty {
            FieldType::Bool => Some(FieldValue::Bool(*b)),
            _ => None,
        },
        Json::Number(n) => {
            let f = n.as_f64()?;
            match ty {
                FieldType::Price => Some(FieldValue::Price(f)),
                FieldType::Float => Some(FieldValue::Float(f)),
                FieldType::Int => int_from_f64(f).map(FieldValue::Int),
                FieldType::Bool => match n.as_i64() {
                    Some(1) => Some(FieldValue::Bool(true)),
                    Some(0) => Some(FieldValue::Bool(false)),
                    _ => None,
                },
                // Numbers occasionally show up in text columns; keep them.
                FieldType::Text => Some(FieldValue::Text(n.to_string())),
                FieldType::Date => None,
            }
        }
        Json::Array(_) | Json::Object(_) => None,
    }
}

/// Normalize a display/spreadsheet string into a canonical typed value.
pub fn normalize_str(ty: FieldType, s: &str) -> Option<FieldValue> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match ty {
        FieldType::Text => Some(FieldValue::Text(trimmed.to_string())),
        FieldType::Price => parse_decimal(trimmed).map(FieldValue::Price),
        FieldType::Float => parse_decimal(trimmed).map(FieldValue::Float),
        FieldType::Int => parse_decimal(trimmed)
            .and_then(int_from_f64)
            .map(FieldValue::Int),
        FieldType::Bool => parse_bool_token(trimmed).map(FieldValue::Bool),
        FieldType::Date => parse_date(trimmed).map(FieldValue::Date),
    }
}

/// Render a canonical value back into its display form.
pub fn denormalize(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Price(v) => format_price(*v),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        FieldValue::Date(dt) => dt.format(DATE_DISPLAY_FORMAT).to_string(),
    }
}

/// Parse a decimal that may use `.` or `,` as the decimal separator.
///
/// When both appear, the rightmost symbol is the decimal separator and
/// the other kind is stripped as a thousands separator. Repeated
/// occurrences of the decimal symbol itself are likewise thousands
/// separators except for the last one.
fn parse_decimal(s: &str) -> Option<f64> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let last_sep = compact.rfind(['.', ',']);

    let cleaned = match last_sep {
        None => compact,
        Some(pos) => compact
            .char_indices()
            .filter_map(|(i, c)| match c {
                '.' | ',' if i == pos => Some('.'),
                '.' | ',' => None,
                other => Some(other),
            })
            .collect(),
    };

    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Truncate toward zero, tolerating inputs like `"5.0"`. Out-of-range
/// floats are absent rather than saturated.
fn int_from_f64(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t >= i64::MIN as f64 && t <= i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// Three-valued boolean parse: true / false / unrecognized (absent).
fn parse_bool_token(s: &str) -> Option<bool> {
    let lower = s.to_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Some(true)
    } else if FALSY.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Accept a bare date or a date-time; midnight is assumed when no time
/// is given.
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATE_WIRE_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
