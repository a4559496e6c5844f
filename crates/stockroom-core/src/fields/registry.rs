//! Declarative registry of editable catalog fields.
//!
//! Each spec names the canonical remote key (dotted for nested fields),
//! a display label, the value type, and the aliases under which the
//! value may appear in externally-sourced records: REST payload keys or
//! spreadsheet column headers.

use serde_json::Value as Json;

use super::value::FieldType;

/// Static specification of one editable field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical remote key. Dotted keys (`dimensions.length`) resolve
    /// through one level of a sub-object.
    pub key: &'static str,
    /// Display label for edit surfaces.
    pub label: &'static str,
    /// Value type driving normalization and wire coercion.
    pub ty: FieldType,
    /// Known aliases, tried in declared order after the canonical key.
    pub aliases: &'static [&'static str],
}

/// All editable fields, in display order.
pub const EDIT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "name",
        label: "Pavadinimas",
        ty: FieldType::Text,
        aliases: &["Pavadinimas"],
    },
    FieldSpec {
        key: "description",
        label: "Aprašymas",
        ty: FieldType::Text,
        aliases: &["Aprašymas"],
    },
    FieldSpec {
        key: "short_description",
        label: "Trumpas aprašymas",
        ty: FieldType::Text,
        aliases: &["Trumpas aprašymas", "Short description"],
    },
    FieldSpec {
        key: "regular_price",
        label: "Reguliari kaina",
        ty: FieldType::Price,
        aliases: &["Reguliari kaina", "Kaina"],
    },
    FieldSpec {
        key: "sale_price",
        label: "Akcijos kaina",
        ty: FieldType::Price,
        aliases: &["Akcijos kaina", "Sale price"],
    },
    FieldSpec {
        key: "date_on_sale_from",
        label: "Akcija nuo",
        ty: FieldType::Date,
        aliases: &["Akcija nuo", "Sale from"],
    },
    FieldSpec {
        key: "date_on_sale_to",
        label: "Akcija iki",
        ty: FieldType::Date,
        aliases: &["Akcija iki", "Sale to"],
    },
    FieldSpec {
        key: "manage_stock",
        label: "Valdyti atsargas",
        ty: FieldType::Bool,
        aliases: &["Valdyti atsargas"],
    },
    FieldSpec {
        key: "stock_quantity",
        label: "Atsargos",
        ty: FieldType::Int,
        aliases: &["Atsargos"],
    },
    FieldSpec {
        key: "dimensions.length",
        label: "Ilgis",
        ty: FieldType::Float,
        aliases: &["Ilgis"],
    },
    FieldSpec {
        key: "dimensions.width",
        label: "Plotis",
        ty: FieldType::Float,
        aliases: &["Plotis"],
    },
    FieldSpec {
        key: "dimensions.height",
        label: "Aukštis",
        ty: FieldType::Float,
        aliases: &["Aukštis"],
    },
    FieldSpec {
        key: "purchase_note",
        label: "Komentaras",
        ty: FieldType::Text,
        aliases: &["Komentaras", "Komentarai", "Pastaba", "Pastabos", "comment"],
    },
];

/// The price-validation sub-group: when the sale/regular ordering rule
/// fails, all four of these are dropped from the edit set together.
pub const PRICE_GROUP: &[&str] = &[
    "regular_price",
    "sale_price",
    "date_on_sale_from",
    "date_on_sale_to",
];

/// Look up the spec for a canonical key.
pub fn spec_for(key: &str) -> Option<&'static FieldSpec> {
    EDIT_FIELDS.iter().find(|spec| spec.key == key)
}

/// Resolve a field's raw value out of a raw record.
///
/// Tries the canonical key first (through one nested level for dotted
/// keys), then each alias in declared order. Returns `Some(&Json::Null)`
/// for a key that is present with an explicit null — callers that need
/// to distinguish "present but null" from "key not found" can.
pub fn resolve<'a>(raw: &'a Json, key: &str) -> Option<&'a Json> {
    let map = raw.as_object()?;

    if let Some((prefix, rest)) = key.split_once('.') {
        if let Some(sub) = map.get(prefix).and_then(Json::as_object) {
            if let Some(v) = sub.get(rest) {
                return Some(v);
            }
        }
    }

    if let Some(v) = map.get(key) {
        return Some(v);
    }

    let aliases = spec_for(key).map(|spec| spec.aliases).unwrap_or(&[]);
    for alias in aliases {
        if let Some(v) = map.get(*alias) {
            return Some(v);
        }
    }
    None
}

/// Match an externally-sourced column header against the registry.
///
/// Headers are compared case-insensitively after diacritic folding and
/// removal of non-alphanumerics, so `"Reguliari kaina"`, `"reguliari-kaina"`
/// and `"REGULIARI KAINA "` all land on `regular_price`.
pub fn match_column(header: &str) -> Option<&'static FieldSpec> {
    let folded = fold_header(header);
    if folded.is_empty() {
        return None;
    }
    EDIT_FIELDS.iter().find(|spec| {
        fold_header(spec.key) == folded
            || spec.aliases.iter().any(|alias| fold_header(alias) == folded)
    })
}

/// Casefold, strip diacritics, drop non-alphanumerics.
fn fold_header(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(strip_diacritic)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Map accented characters to their ASCII base. Covers the Lithuanian
/// alphabet plus the Latin-1 accents seen in supplier spreadsheets.
fn strip_diacritic(c: char) -> char {
    match c {
        'ą' | 'à' | 'á' | 'â' | 'ä' | 'å' => 'a',
        'č' | 'ç' => 'c',
        'ę' | 'ė' | 'è' | 'é' | 'ê' | 'ë' => 'e',
        'į' | 'ì' | 'í' | 'î' | 'ï' => 'i',
        'š' => 's',
        'ų' | 'ū' | 'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ž' => 'z',
        'ò' | 'ó' | 'ô' | 'ö' => 'o',
        'ñ' => 'n',
        other => other,
    }
}
