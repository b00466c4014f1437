//! Plugin registration and application.
//!
//! Plugins are the only writers of the theme and the registries, and they
//! run to completion, single-threaded, before any compile call. Application
//! order is deterministic: registration order, refined by a topological
//! sort over declared dependencies. Misconfiguration here is a hard error;
//! it is cheap to enforce and never on the hot path.

use std::collections::HashMap;

use crate::css::CssNode;
use crate::error::{Error, Result};
use crate::registry::{
    CustomProperty, FunctionalUtility, UtilityRegistry, VariantRegistry, Wrapper,
};
use crate::theme::Theme;

/// Per-plugin configuration values, exposed through [`PluginApi::config`].
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    values: HashMap<String, String>,
}

impl PluginOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a configuration value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A third-party extension point.
///
/// Plugins never see compiled rules; they only shape the theme and the
/// registries before compilation starts.
pub trait Plugin {
    /// Unique plugin name. Duplicates are a setup error.
    fn name(&self) -> &str;

    /// Names of plugins whose theme extensions must be applied first.
    fn depends_on(&self) -> Vec<String> {
        vec![]
    }

    /// Theme tokens contributed by this plugin.
    fn theme_extensions(&self, options: &PluginOptions) -> Vec<(String, String)> {
        let _ = options;
        vec![]
    }

    /// Register utilities and variants.
    fn apply(&self, api: &mut PluginApi<'_>, options: &PluginOptions) -> Result<()>;
}

/// The registration surface handed to [`Plugin::apply`].
pub struct PluginApi<'a> {
    theme: &'a mut Theme,
    utilities: &'a mut UtilityRegistry,
    variants: &'a mut VariantRegistry,
    base: &'a mut Vec<CssNode>,
    components: &'a mut Vec<CssNode>,
    options: &'a PluginOptions,
}

impl<'a> PluginApi<'a> {
    pub(crate) fn new(
        theme: &'a mut Theme,
        utilities: &'a mut UtilityRegistry,
        variants: &'a mut VariantRegistry,
        base: &'a mut Vec<CssNode>,
        components: &'a mut Vec<CssNode>,
        options: &'a PluginOptions,
    ) -> Self {
        Self {
            theme,
            utilities,
            variants,
            base,
            components,
            options,
        }
    }

    /// Add rules to the base layer.
    pub fn add_base(&mut self, nodes: Vec<CssNode>) {
        self.base.extend(nodes);
    }

    /// Add a rule to the components layer.
    pub fn add_components(&mut self, selector: impl Into<String>, nodes: Vec<CssNode>) {
        self.components.push(CssNode::nested(selector, nodes));
    }

    /// Register a static utility from a flat list of declaration nodes.
    pub fn add_utilities(&mut self, name: impl Into<String>, nodes: Vec<CssNode>) -> Result<()> {
        let name = name.into();
        let mut declarations = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                CssNode::Decl(decl) => declarations.push(decl),
                CssNode::Nested { .. } => {
                    return Err(Error::invalid_registration(
                        name,
                        "static utilities cannot contain nested rules",
                    ));
                }
            }
        }
        self.utilities.add_static(name, declarations)
    }

    /// Register a functional utility.
    pub fn match_utilities(
        &mut self,
        name: impl Into<String>,
        utility: FunctionalUtility,
    ) -> Result<()> {
        self.utilities.add_functional(name, utility)
    }

    /// Register a static variant.
    pub fn add_variant(&mut self, name: impl Into<String>, wrapper: Wrapper) -> Result<()> {
        self.variants.add_static(name, wrapper)
    }

    /// Register a functional variant.
    pub fn match_variant(
        &mut self,
        name: impl Into<String>,
        generate: impl Fn(&str) -> Option<Wrapper> + Send + Sync + 'static,
    ) -> Result<()> {
        self.variants.add_functional(name, generate)
    }

    /// Declare an engine-owned custom property for `@property` synthesis.
    pub fn register_property(&mut self, name: impl Into<String>, property: CustomProperty) {
        self.utilities.add_property(name, property);
    }

    /// Resolve a theme path, falling back to `default`.
    pub fn theme(&self, path: &str, default: &str) -> String {
        self.theme
            .resolve_path(path)
            .unwrap_or_else(|| default.to_string())
    }

    /// Read a configuration value, falling back to `default`.
    pub fn config(&self, key: &str, default: &str) -> String {
        self.options
            .get(key)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Apply the configured class prefix to a class name.
    pub fn prefix(&self, class_name: &str) -> String {
        match self.theme.prefix() {
            Some(p) => format!("{p}-{class_name}"),
            None => class_name.to_string(),
        }
    }
}

/// A registered plugin together with its options.
pub struct PluginEntry {
    pub plugin: Box<dyn Plugin>,
    pub options: PluginOptions,
}

impl PluginEntry {
    /// Wrap a plugin with default options.
    pub fn new(plugin: Box<dyn Plugin>) -> Self {
        Self {
            plugin,
            options: PluginOptions::new(),
        }
    }

    /// Wrap a plugin with options.
    pub fn with_options(plugin: Box<dyn Plugin>, options: PluginOptions) -> Self {
        Self { plugin, options }
    }
}

/// Apply `plugins` to the theme and registries, in dependency order.
///
/// Theme extensions land first (so every `apply` sees the fully extended
/// theme), then each plugin's `apply` runs. Within both passes the order is
/// the topological order; independent plugins keep registration order.
/// Same-key theme extensions are last-write-wins.
pub fn apply_plugins(
    plugins: &[PluginEntry],
    theme: &mut Theme,
    utilities: &mut UtilityRegistry,
    variants: &mut VariantRegistry,
    base: &mut Vec<CssNode>,
    components: &mut Vec<CssNode>,
) -> Result<()> {
    let order = dependency_order(plugins)?;

    for &i in &order {
        let entry = &plugins[i];
        let name = entry.plugin.name().to_string();
        for (key, value) in entry.plugin.theme_extensions(&entry.options) {
            if key.trim().is_empty() {
                return Err(Error::invalid_theme_extension(name, "empty theme key"));
            }
            if key.contains(char::is_whitespace) {
                return Err(Error::invalid_theme_extension(
                    name,
                    format!("theme key '{key}' contains whitespace"),
                ));
            }
            theme.add(key, value);
        }
    }

    for &i in &order {
        let entry = &plugins[i];
        tracing::debug!(plugin = entry.plugin.name(), "applying plugin");
        let mut api = PluginApi::new(theme, utilities, variants, base, components, &entry.options);
        entry.plugin.apply(&mut api, &entry.options)?;
    }

    Ok(())
}

/// Topological order over plugin dependencies, stable with respect to
/// registration order. Duplicate names and cycles are setup errors; a cycle
/// is reported with its offending path.
fn dependency_order(plugins: &[PluginEntry]) -> Result<Vec<usize>> {
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (i, entry) in plugins.iter().enumerate() {
        let name = entry.plugin.name();
        if by_name.insert(name, i).is_some() {
            return Err(Error::duplicate_plugin(name));
        }
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; plugins.len()];
    let mut order = Vec::with_capacity(plugins.len());

    fn visit(
        i: usize,
        plugins: &[PluginEntry],
        by_name: &HashMap<&str, usize>,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
        path: &mut Vec<String>,
    ) -> Result<()> {
        let name = plugins[i].plugin.name().to_string();
        match marks[i] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let mut cycle = path.clone();
                cycle.push(name);
                return Err(Error::CircularDependency { path: cycle });
            }
            Mark::Unvisited => {}
        }

        marks[i] = Mark::InProgress;
        path.push(name.clone());

        for dep in plugins[i].plugin.depends_on() {
            let Some(&j) = by_name.get(dep.as_str()) else {
                return Err(Error::UnknownDependency {
                    plugin: name,
                    dependency: dep,
                });
            };
            visit(j, plugins, by_name, marks, order, path)?;
        }

        path.pop();
        marks[i] = Mark::Done;
        order.push(i);
        Ok(())
    }

    let mut path = Vec::new();
    for i in 0..plugins.len() {
        visit(i, plugins, &by_name, &mut marks, &mut order, &mut path)?;
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPlugin {
        name: &'static str,
        deps: Vec<String>,
        tokens: Vec<(String, String)>,
    }

    impl TestPlugin {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                deps: vec![],
                tokens: vec![],
            }
        }

        fn depends(mut self, dep: &str) -> Self {
            self.deps.push(dep.to_string());
            self
        }

        fn token(mut self, key: &str, value: &str) -> Self {
            self.tokens.push((key.to_string(), value.to_string()));
            self
        }
    }

    impl Plugin for TestPlugin {
        fn name(&self) -> &str {
            self.name
        }

        fn depends_on(&self) -> Vec<String> {
            self.deps.clone()
        }

        fn theme_extensions(&self, _options: &PluginOptions) -> Vec<(String, String)> {
            self.tokens.clone()
        }

        fn apply(&self, _api: &mut PluginApi<'_>, _options: &PluginOptions) -> Result<()> {
            Ok(())
        }
    }

    fn run(plugins: Vec<TestPlugin>) -> Result<Theme> {
        let entries: Vec<PluginEntry> = plugins
            .into_iter()
            .map(|p| PluginEntry::new(Box::new(p)))
            .collect();
        let mut theme = Theme::new();
        let mut utilities = UtilityRegistry::new();
        let mut variants = VariantRegistry::new();
        let mut base = vec![];
        let mut components = vec![];
        apply_plugins(
            &entries,
            &mut theme,
            &mut utilities,
            &mut variants,
            &mut base,
            &mut components,
        )?;
        Ok(theme)
    }

    #[test]
    fn duplicate_names_fail() {
        let err = run(vec![TestPlugin::new("a"), TestPlugin::new("a")]).unwrap_err();
        assert!(matches!(err, Error::DuplicatePlugin { .. }));
    }

    #[test]
    fn dependency_order_applies_dependencies_first() {
        let theme = run(vec![
            TestPlugin::new("colors-alt").depends("colors").token("--color-hot", "crimson"),
            TestPlugin::new("colors").token("--color-hot", "red"),
        ])
        .unwrap();

        // colors runs first, colors-alt overrides: last write wins.
        assert_eq!(theme.get("--color-hot"), Some("crimson"));
    }

    #[test]
    fn cycles_are_reported_with_path() {
        let err = run(vec![
            TestPlugin::new("a").depends("b"),
            TestPlugin::new("b").depends("a"),
        ])
        .unwrap_err();

        match err {
            Error::CircularDependency { path } => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected circular dependency, got {other:?}"),
        }
    }

    #[test]
    fn unknown_dependency_fails() {
        let err = run(vec![TestPlugin::new("a").depends("ghost")]).unwrap_err();
        assert!(matches!(err, Error::UnknownDependency { .. }));
    }

    #[test]
    fn malformed_theme_extension_fails() {
        let err = run(vec![TestPlugin::new("a").token("  ", "x")]).unwrap_err();
        assert!(matches!(err, Error::InvalidThemeExtension { .. }));
        let err = run(vec![TestPlugin::new("a").token("--bad key", "x")]).unwrap_err();
        assert!(matches!(err, Error::InvalidThemeExtension { .. }));
    }
}
