//! The reconciliation engine: validate a pending edit set against its
//! snapshot baseline and build the wire payload.
//!
//! Validation drops offending sub-fields and reports them; it never
//! rejects a whole item, so unrelated fields still proceed.

use serde_json::{Map, Value as Json};
use stockroom_core::fields::{
    normalize, resolve, spec_for, FieldValue, PRICE_GROUP,
};

use crate::report::{FailureReason, ItemFailure};

/// One validated, wire-ready item.
#[derive(Debug, Clone)]
pub struct ItemPayload {
    pub remote_id: i64,
    /// Wire body, including the `id` field and any implied flags.
    pub body: Map<String, Json>,
    /// The dotted edit keys this payload carries — exactly the keys to
    /// clear from the edit store once the remote confirms.
    pub keys: Vec<String>,
}

/// Output of reconciling one item.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub payload: Option<ItemPayload>,
    pub failures: Vec<ItemFailure>,
}

/// Validate one item's pending edits against its snapshot and build
/// the payload. `snapshot` is the raw remote representation, if cached.
pub fn reconcile_item(
    remote_id: i64,
    pending: &Map<String, Json>,
    snapshot: Option<&Json>,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    // Re-normalize the stored blob values; normalization is idempotent,
    // so canonical blobs pass through unchanged and any hand-edited or
    // legacy blob gets the same treatment as fresh input.
    let mut edits: Vec<(String, FieldValue)> = Vec::with_capacity(pending.len());
    for (key, raw) in pending {
        let Some(spec) = spec_for(key) else {
            continue;
        };
        if let Some(value) = normalize(spec.ty, raw) {
            edits.push((key.clone(), value));
        }
    }

    apply_price_rule(remote_id, &mut edits, snapshot, &mut outcome.failures);
    apply_stock_gate(remote_id, &mut edits, snapshot, &mut outcome.failures);

    if edits.is_empty() {
        return outcome;
    }

    outcome.payload = Some(build_payload(remote_id, &edits));
    outcome
}

/// Effective value of a field: the edit if present, else the baseline.
fn effective(
    edits: &[(String, FieldValue)],
    snapshot: Option<&Json>,
    key: &str,
) -> Option<FieldValue> {
    if let Some((_, v)) = edits.iter().find(|(k, _)| k == key) {
        return Some(v.clone());
    }
    let spec = spec_for(key)?;
    let raw = snapshot?;
    resolve(raw, key).and_then(|v| normalize(spec.ty, v))
}

fn as_price(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Price(v) | FieldValue::Float(v) => Some(*v),
        FieldValue::Int(v) => Some(*v as f64),
        _ => None,
    }
}

/// Price ordering: effective sale must not exceed effective regular.
/// On violation the whole price sub-group is dropped, other fields
/// proceed.
fn apply_price_rule(
    remote_id: i64,
    edits: &mut Vec<(String, FieldValue)>,
    snapshot: Option<&Json>,
    failures: &mut Vec<ItemFailure>,
) {
    let touches_prices = edits
        .iter()
        .any(|(k, _)| k == "regular_price" || k == "sale_price");
    if !touches_prices {
        return;
    }

    let regular = effective(edits, snapshot, "regular_price").as_ref().and_then(as_price);
    let sale = effective(edits, snapshot, "sale_price").as_ref().and_then(as_price);

    if let (Some(regular), Some(sale)) = (regular, sale) {
        if sale > regular {
            edits.retain(|(k, _)| !PRICE_GROUP.contains(&k.as_str()));
            failures.push(ItemFailure::new(
                remote_id,
                FailureReason::PriceOrder,
                format!("sale price {sale} exceeds regular price {regular}"),
            ));
        }
    }
}

/// Stock-tracking gate: a quantity edit is only transmittable when the
/// item tracks stock — either the edit set also touches `manage_stock`,
/// or the baseline already has it true.
fn apply_stock_gate(
    remote_id: i64,
    edits: &mut Vec<(String, FieldValue)>,
    snapshot: Option<&Json>,
    failures: &mut Vec<ItemFailure>,
) {
    let touches_quantity = edits.iter().any(|(k, _)| k == "stock_quantity");
    let touches_manage = edits.iter().any(|(k, _)| k == "manage_stock");
    if !touches_quantity || touches_manage {
        return;
    }

    let baseline_manages = snapshot
        .and_then(|raw| resolve(raw, "manage_stock"))
        .and_then(|v| normalize(stockroom_core::FieldType::Bool, v))
        == Some(FieldValue::Bool(true));

    if !baseline_manages {
        edits.retain(|(k, _)| k != "stock_quantity");
        failures.push(ItemFailure::new(
            remote_id,
            FailureReason::StockGate,
            "quantity edit requires stock tracking to be enabled",
        ));
    }
}

/// Flatten the validated edits into the wire body: dotted keys fold
/// into their nested object, values coerce per type, and sending a
/// quantity without an explicit manage flag implies `manage_stock: true`.
fn build_payload(remote_id: i64, edits: &[(String, FieldValue)]) -> ItemPayload {
    let mut body = Map::new();
    body.insert("id".to_string(), Json::Number(remote_id.into()));

    let mut keys = Vec::with_capacity(edits.len());
    for (key, value) in edits {
        keys.push(key.clone());
        match key.split_once('.') {
            Some((prefix, rest)) => {
                let nested = body
                    .entry(prefix.to_string())
                    .or_insert_with(|| Json::Object(Map::new()));
                if let Json::Object(map) = nested {
                    map.insert(rest.to_string(), value.to_wire_json());
                }
            }
            None => {
                body.insert(key.clone(), value.to_wire_json());
            }
        }
    }

    if body.contains_key("stock_quantity") && !body.contains_key("manage_stock") {
        body.insert("manage_stock".to_string(), Json::Bool(true));
    }

    ItemPayload {
        remote_id,
        body,
        keys,
    }
}
