//! Utility definitions and the utility registry.

use std::collections::HashMap;
use std::fmt;

use crate::css::Declaration;
use crate::error::{Error, Result};
use crate::value::DataType;

/// Generator callback for a functional utility.
///
/// Receives the fully resolved value string and the resolved modifier (when
/// the utility declares a modifier table) and produces the declarations, or
/// `None` to reject the value.
pub type UtilityGenerator = Box<dyn Fn(&str, Option<&str>) -> Option<Vec<Declaration>> + Send + Sync>;

/// How a named value in a `values` table resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueDef {
    /// Use the string as-is.
    Literal(String),
    /// Look the key up in the theme and emit `var(<key>)`.
    Theme(String),
}

/// A functional utility definition: `name-<value>`.
pub struct FunctionalUtility {
    /// Accepted value types, in inference priority order.
    pub types: Vec<DataType>,
    /// Theme namespaces searched for named values (`--color` for `bg-*`).
    pub namespaces: Vec<String>,
    /// Named values (`DEFAULT` included) that bypass the theme search.
    pub values: HashMap<String, ValueDef>,
    /// Whether a leading `-` is meaningful for this utility.
    pub supports_negative: bool,
    /// Named modifier table, resolved before the generator runs.
    pub modifiers: Option<HashMap<String, String>>,
    generate: UtilityGenerator,
}

impl fmt::Debug for FunctionalUtility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalUtility")
            .field("types", &self.types)
            .field("namespaces", &self.namespaces)
            .field("values", &self.values)
            .field("supports_negative", &self.supports_negative)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

impl FunctionalUtility {
    /// Create a definition with the given generator.
    pub fn new(
        generate: impl Fn(&str, Option<&str>) -> Option<Vec<Declaration>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            types: vec![DataType::Any],
            namespaces: vec![],
            values: HashMap::new(),
            supports_negative: false,
            modifiers: None,
            generate: Box::new(generate),
        }
    }

    /// Shorthand for a utility that maps its value onto fixed properties.
    pub fn for_properties(properties: &[&str]) -> Self {
        let properties: Vec<String> = properties.iter().map(|p| (*p).to_string()).collect();
        Self::new(move |value, _| {
            Some(
                properties
                    .iter()
                    .map(|p| Declaration::new(p.clone(), value))
                    .collect(),
            )
        })
    }

    /// Set the accepted value types (inference priority order).
    pub fn types(mut self, types: &[DataType]) -> Self {
        self.types = types.to_vec();
        self
    }

    /// Add a theme namespace searched for named values.
    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespaces.push(ns.into());
        self
    }

    /// Add a named value.
    pub fn value(mut self, name: impl Into<String>, def: ValueDef) -> Self {
        self.values.insert(name.into(), def);
        self
    }

    /// Allow negative candidates (`-mt-4`).
    pub fn negative(mut self) -> Self {
        self.supports_negative = true;
        self
    }

    /// Attach a named modifier table.
    pub fn modifiers(mut self, table: HashMap<String, String>) -> Self {
        self.modifiers = Some(table);
        self
    }

    /// Run the generator.
    pub fn generate(&self, value: &str, modifier: Option<&str>) -> Option<Vec<Declaration>> {
        (self.generate)(value, modifier)
    }

    /// Whether the utility's declared types include `Color` (which opts it
    /// into opacity modifiers).
    pub fn is_color_utility(&self) -> bool {
        self.types.contains(&DataType::Color)
    }
}

/// Synthesized `@property` metadata for an engine-owned custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomProperty {
    pub syntax: String,
    pub inherits: bool,
    pub initial_value: Option<String>,
}

impl Default for CustomProperty {
    fn default() -> Self {
        Self {
            syntax: "\"*\"".to_string(),
            inherits: false,
            initial_value: None,
        }
    }
}

/// Registry of static and functional utilities.
///
/// Definitions are registered once at setup time; compile-time lookups are
/// read-only.
#[derive(Debug, Default)]
pub struct UtilityRegistry {
    statics: HashMap<String, Vec<Declaration>>,
    functionals: HashMap<String, FunctionalUtility>,
    properties: Vec<(String, CustomProperty)>,
}

impl UtilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a static utility. Duplicate names are a setup error.
    pub fn add_static(
        &mut self,
        name: impl Into<String>,
        declarations: Vec<Declaration>,
    ) -> Result<()> {
        let name = name.into();
        if self.statics.contains_key(&name) {
            return Err(Error::invalid_registration(name, "static utility already registered"));
        }
        self.statics.insert(name, declarations);
        Ok(())
    }

    /// Register a functional utility. Duplicate names are a setup error.
    pub fn add_functional(
        &mut self,
        name: impl Into<String>,
        utility: FunctionalUtility,
    ) -> Result<()> {
        let name = name.into();
        if self.functionals.contains_key(&name) {
            return Err(Error::invalid_registration(
                name,
                "functional utility already registered",
            ));
        }
        self.functionals.insert(name, utility);
        Ok(())
    }

    /// Declare an engine-owned custom property (`--tw-*`) so the assembler
    /// can synthesize its `@property` rule. Re-declaring replaces the entry.
    pub fn add_property(&mut self, name: impl Into<String>, property: CustomProperty) {
        let name = name.into();
        if let Some(entry) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = property;
        } else {
            self.properties.push((name, property));
        }
    }

    /// Look up a static utility's declarations.
    pub fn get_static(&self, name: &str) -> Option<&[Declaration]> {
        self.statics.get(name).map(Vec::as_slice)
    }

    /// Look up a functional utility.
    pub fn get_functional(&self, name: &str) -> Option<&FunctionalUtility> {
        self.functionals.get(name)
    }

    /// Registered `@property` metadata for `name`, if declared.
    pub fn get_property(&self, name: &str) -> Option<&CustomProperty> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// All declared `@property` entries, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &CustomProperty)> {
        self.properties.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Whether `name` is a registered static utility.
    pub fn is_static(&self, name: &str) -> bool {
        self.statics.contains_key(name)
    }

    /// Split `root` at the longest registered functional prefix.
    ///
    /// `bg-red-500` matches `bg` → `("bg", Some("red-500"))` unless a longer
    /// functional name like `bg-red` is registered. A full-name match yields
    /// `(name, None)` (the `DEFAULT` value).
    pub fn prefix_match<'a>(&self, root: &'a str) -> Option<(&str, Option<&'a str>)> {
        if let Some((name, _)) = self.functionals.get_key_value(root) {
            return Some((name.as_str(), None));
        }

        let bytes = root.as_bytes();
        for i in (0..bytes.len()).rev() {
            if bytes[i] != b'-' {
                continue;
            }
            let prefix = &root[..i];
            if let Some((name, _)) = self.functionals.get_key_value(prefix) {
                let rest = &root[i + 1..];
                if rest.is_empty() {
                    return None;
                }
                return Some((name.as_str(), Some(rest)));
            }
        }

        None
    }
}
