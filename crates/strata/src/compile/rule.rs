//! Compiled rule representation.

use crate::css::Declaration;

/// The cascade layer a rule belongs to. Layers serialize in declaration
/// order of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Properties,
    Base,
    Components,
    Utilities,
}

/// A fully resolved rule, ready for ordering and serialization.
///
/// `at_rules` wrap outside-in: the first entry is the outermost wrapper.
/// `order_key` is the raw class name for utilities, used for natural-order
/// sorting within the utilities layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    pub layer: Layer,
    pub selector: String,
    pub at_rules: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub order_key: String,
}

impl CompiledRule {
    pub fn utility(
        selector: impl Into<String>,
        at_rules: Vec<String>,
        declarations: Vec<Declaration>,
        order_key: impl Into<String>,
    ) -> Self {
        Self {
            layer: Layer::Utilities,
            selector: selector.into(),
            at_rules,
            declarations,
            order_key: order_key.into(),
        }
    }
}
