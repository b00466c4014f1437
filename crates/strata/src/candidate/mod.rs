//! Candidate parsing: one raw class token → structured [`Candidate`].

mod parser;
mod types;

pub use parser::parse_candidate;
pub use types::{Candidate, Modifier, UtilityRef, Value, Variant};
