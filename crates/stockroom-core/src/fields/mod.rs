//! Editable-field catalog: declarative field specs, alias resolution
//! over raw JSON records, and canonical value normalization.

pub mod normalize;
pub mod registry;
pub mod value;

pub use normalize::{denormalize, normalize, normalize_str};
pub use registry::{
    match_column, resolve, spec_for, FieldSpec, EDIT_FIELDS, PRICE_GROUP,
};
pub use value::{FieldType, FieldValue};
