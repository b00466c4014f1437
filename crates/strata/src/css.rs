//! Shared CSS building blocks: declarations and nested node trees.

use std::fmt;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// A small recursive CSS tree, built explicitly by plugin authors for
/// `add_base` / `add_components`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CssNode {
    /// A declaration.
    Decl(Declaration),
    /// A nested rule: `selector { nodes }`. The selector may also be an
    /// at-rule prelude (`@media ...`).
    Nested {
        selector: String,
        nodes: Vec<CssNode>,
    },
}

impl CssNode {
    /// Create a declaration node.
    pub fn decl(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Decl(Declaration::new(property, value))
    }

    /// Create a nested rule node.
    pub fn nested(selector: impl Into<String>, nodes: Vec<CssNode>) -> Self {
        Self::Nested {
            selector: selector.into(),
            nodes,
        }
    }
}
