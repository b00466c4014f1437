//! Value inspection: classification, arbitrary-value validation and
//! decoding, and math-operator whitespace normalization.

pub mod arbitrary;
pub mod classify;
pub mod math;

pub use arbitrary::{decode_arbitrary_value, is_valid_arbitrary};
pub use classify::{
    infer_data_type, is_valid_opacity_value, is_valid_spacing_multiplier, DataType,
};
pub use math::{add_whitespace_around_math_operators, has_math_fn};
