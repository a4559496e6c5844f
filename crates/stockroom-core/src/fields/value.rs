//! Canonical typed values for editable catalog fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// The declared type of an editable field. Drives normalization,
/// validation grouping, and wire coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Price,
    Int,
    Float,
    Bool,
    Date,
}

/// A canonical in-memory field value.
///
/// "No value" is represented by `Option<FieldValue>::None` everywhere,
/// never by a sentinel inside the enum. This keeps the three-valued
/// bool semantics honest: `Some(Bool(false))` is an explicit false to
/// be transmitted, `None` means "leave the remote value alone".
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Price(f64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

/// On-the-wire datetime format: `YYYY-MM-DDTHH:MM:SS`.
pub const DATE_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Display date format: bare date.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";

impl FieldValue {
    /// The declared type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Price(_) => FieldType::Price,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Date(_) => FieldType::Date,
        }
    }

    /// Canonical JSON representation, used for the pending-edit blob.
    /// Dates serialize in wire form so that re-normalizing a stored
    /// blob is a fixed point.
    pub fn to_canonical_json(&self) -> Json {
        match self {
            FieldValue::Text(s) => Json::String(s.clone()),
            FieldValue::Price(v) | FieldValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            FieldValue::Int(v) => Json::Number((*v).into()),
            FieldValue::Bool(b) => Json::Bool(*b),
            FieldValue::Date(dt) => Json::String(dt.format(DATE_WIRE_FORMAT).to_string()),
        }
    }

    /// Wire (remote API) representation. Differs from canonical JSON
    /// only where the remote expects a different encoding: prices go
    /// out as string-encoded decimals.
    pub fn to_wire_json(&self) -> Json {
        match self {
            FieldValue::Price(v) => Json::String(format_price(*v)),
            other => other.to_canonical_json(),
        }
    }
}

/// Format a price for the wire: two decimal places, dot separator.
pub fn format_price(v: f64) -> String {
    format!("{v:.2}")
}
