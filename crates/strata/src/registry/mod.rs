//! Utility and variant registries.
//!
//! Definitions are registered once at setup (built-ins, then plugins in
//! registration order); lookups during compilation are read-only.

pub mod utilities;
pub mod variants;

pub use utilities::{CustomProperty, FunctionalUtility, UtilityGenerator, UtilityRegistry, ValueDef};
pub use variants::{CompoundGenerator, VariantGenerator, VariantRegistry, Wrapper};
