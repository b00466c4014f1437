//! Variant definitions and the variant registry.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// The selector/at-rule wrapper a variant resolves to.
///
/// `selector` is a template containing `&` (the wrapped rule's selector);
/// `at_rule` is a full at-rule prelude (`@media (hover: hover)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Wrapper {
    pub selector: Option<String>,
    pub at_rule: Option<String>,
}

impl Wrapper {
    /// A selector-only wrapper, e.g. `&:hover`.
    pub fn selector(template: impl Into<String>) -> Self {
        Self {
            selector: Some(template.into()),
            at_rule: None,
        }
    }

    /// An at-rule-only wrapper, e.g. `@media (width >= 48rem)`.
    pub fn at_rule(prelude: impl Into<String>) -> Self {
        Self {
            selector: None,
            at_rule: Some(prelude.into()),
        }
    }

    /// A wrapper that applies both an at-rule and a selector template.
    pub fn both(prelude: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            selector: Some(template.into()),
            at_rule: Some(prelude.into()),
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.at_rule, &self.selector) {
            (Some(at), Some(sel)) => write!(f, "{at} {{ {sel} }}"),
            (Some(at), None) => write!(f, "{at}"),
            (None, Some(sel)) => write!(f, "{sel}"),
            (None, None) => Ok(()),
        }
    }
}

/// Generator for a functional variant: resolved value → wrapper.
pub type VariantGenerator = Box<dyn Fn(&str) -> Option<Wrapper> + Send + Sync>;

/// Generator for a compound variant: inner wrapper + optional modifier →
/// wrapper.
pub type CompoundGenerator = Box<dyn Fn(&Wrapper, Option<&str>) -> Option<Wrapper> + Send + Sync>;

/// Registry of static, functional, and compound variants.
#[derive(Default)]
pub struct VariantRegistry {
    statics: HashMap<String, Vec<Wrapper>>,
    functionals: HashMap<String, VariantGenerator>,
    compounds: HashMap<String, CompoundGenerator>,
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("statics", &self.statics.len())
            .field("functionals", &self.functionals.len())
            .field("compounds", &self.compounds.len())
            .finish()
    }
}

impl VariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a static variant with a single wrapper.
    pub fn add_static(&mut self, name: impl Into<String>, wrapper: Wrapper) -> Result<()> {
        self.add_static_multi(name, vec![wrapper])
    }

    /// Register a static variant that expands into several wrappers, each
    /// yielding its own rule (e.g. `marker:` targets `::marker` on the
    /// element and its children).
    pub fn add_static_multi(
        &mut self,
        name: impl Into<String>,
        wrappers: Vec<Wrapper>,
    ) -> Result<()> {
        let name = name.into();
        if self.is_known(&name) {
            return Err(Error::invalid_registration(name, "variant already registered"));
        }
        self.statics.insert(name, wrappers);
        Ok(())
    }

    /// Register a functional variant.
    pub fn add_functional(
        &mut self,
        name: impl Into<String>,
        generate: impl Fn(&str) -> Option<Wrapper> + Send + Sync + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.is_known(&name) {
            return Err(Error::invalid_registration(name, "variant already registered"));
        }
        self.functionals.insert(name, Box::new(generate));
        Ok(())
    }

    /// Register a compound variant (`group-*`, `peer-*`, `has-*`).
    pub fn add_compound(
        &mut self,
        name: impl Into<String>,
        generate: impl Fn(&Wrapper, Option<&str>) -> Option<Wrapper> + Send + Sync + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.is_known(&name) {
            return Err(Error::invalid_registration(name, "variant already registered"));
        }
        self.compounds.insert(name, Box::new(generate));
        Ok(())
    }

    fn is_known(&self, name: &str) -> bool {
        self.statics.contains_key(name)
            || self.functionals.contains_key(name)
            || self.compounds.contains_key(name)
    }

    /// Look up a static variant's wrappers.
    pub fn get_static(&self, name: &str) -> Option<&[Wrapper]> {
        self.statics.get(name).map(Vec::as_slice)
    }

    /// Whether `name` is a registered static variant.
    pub fn is_static(&self, name: &str) -> bool {
        self.statics.contains_key(name)
    }

    /// Run a functional variant's generator.
    pub fn generate_functional(&self, name: &str, value: &str) -> Option<Wrapper> {
        self.functionals.get(name).and_then(|f| f(value))
    }

    /// Whether `name` is a registered functional variant.
    pub fn is_functional(&self, name: &str) -> bool {
        self.functionals.contains_key(name)
    }

    /// Run a compound variant's generator over an inner wrapper.
    pub fn generate_compound(
        &self,
        name: &str,
        inner: &Wrapper,
        modifier: Option<&str>,
    ) -> Option<Wrapper> {
        self.compounds.get(name).and_then(|f| f(inner, modifier))
    }

    /// Whether `name` is a registered compound variant.
    pub fn is_compound(&self, name: &str) -> bool {
        self.compounds.contains_key(name)
    }

    /// Split `segment` at the longest registered functional or compound
    /// prefix, returning `(name, rest)`.
    pub fn prefix_match<'a>(&self, segment: &'a str) -> Option<(&str, &'a str)> {
        let bytes = segment.as_bytes();
        for i in (0..bytes.len()).rev() {
            if bytes[i] != b'-' {
                continue;
            }
            let prefix = &segment[..i];
            let rest = &segment[i + 1..];
            if rest.is_empty() {
                continue;
            }
            if let Some((name, _)) = self.functionals.get_key_value(prefix) {
                return Some((name.as_str(), rest));
            }
            if let Some((name, _)) = self.compounds.get_key_value(prefix) {
                return Some((name.as_str(), rest));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_lookup() {
        let mut reg = VariantRegistry::new();
        reg.add_static("hover", Wrapper::selector("&:hover")).unwrap();
        assert!(reg.is_static("hover"));
        assert_eq!(
            reg.get_static("hover"),
            Some(&[Wrapper::selector("&:hover")][..])
        );
    }

    #[test]
    fn duplicate_names_rejected_across_kinds() {
        let mut reg = VariantRegistry::new();
        reg.add_static("hover", Wrapper::selector("&:hover")).unwrap();
        assert!(reg.add_functional("hover", |_| None).is_err());
        assert!(reg.add_compound("hover", |_, _| None).is_err());
    }

    #[test]
    fn functional_prefix_match() {
        let mut reg = VariantRegistry::new();
        reg.add_functional("supports", |value| {
            Some(Wrapper::at_rule(format!("@supports ({value})")))
        })
        .unwrap();
        reg.add_compound("group", |_, _| None).unwrap();

        assert_eq!(reg.prefix_match("supports-grid"), Some(("supports", "grid")));
        assert_eq!(reg.prefix_match("group-hover"), Some(("group", "hover")));
        assert_eq!(reg.prefix_match("unknown-x"), None);
        assert_eq!(reg.prefix_match("supports-"), None);
    }

    #[test]
    fn wrapper_display() {
        assert_eq!(Wrapper::selector("&:hover").to_string(), "&:hover");
        assert_eq!(
            Wrapper::both("@media (hover: hover)", "&:hover").to_string(),
            "@media (hover: hover) { &:hover }"
        );
    }
}
