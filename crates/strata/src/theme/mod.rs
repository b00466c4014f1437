//! Namespaced design-token store.
//!
//! Theme keys are CSS custom property names (`--color-red-500`). Plugins may
//! also address them through dot paths (`colors.red.500`), which resolve
//! through a fixed namespace table.

use std::collections::HashMap;

use crate::value::classify::is_color;

/// Dot-path namespace → custom property prefix.
const NAMESPACE_TABLE: &[(&str, &str)] = &[
    ("colors", "--color"),
    ("spacing", "--spacing"),
    ("fontFamily", "--font-family"),
    ("fontSize", "--text"),
    ("fontWeight", "--font-weight"),
    ("letterSpacing", "--tracking"),
    ("lineHeight", "--leading"),
    ("borderRadius", "--radius"),
    ("boxShadow", "--shadow"),
    ("screens", "--breakpoint"),
    ("blur", "--blur"),
    ("animation", "--animate"),
    ("opacity", "--opacity"),
];

/// An ordered mapping from namespaced keys to CSS value strings.
///
/// Mutation happens only during plugin application; compile passes treat the
/// theme as read-only.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Insertion-ordered entries; `namespace()` enumeration depends on it.
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    prefix: Option<String>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a value. The last write wins; overwriting keeps the
    /// key's original position in enumeration order.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = normalize_key(key.into());
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Look up a value by its full key (`--color-red-500`, with or without
    /// the leading dashes).
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_ref(key);
        self.index
            .get(key.as_ref())
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Whether the theme contains `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All `(suffix, value)` pairs under a namespace prefix, in insertion
    /// order. `namespace("--color")` yields `("red-500", ...)` entries.
    pub fn namespace(&self, ns: &str) -> Vec<(&str, &str)> {
        let ns = normalize_ref(ns);
        self.entries
            .iter()
            .filter_map(|(k, v)| {
                let rest = k.strip_prefix(ns.as_ref())?;
                let suffix = rest.strip_prefix('-')?;
                Some((suffix, v.as_str()))
            })
            .collect()
    }

    /// Set the class prefix applied to generated selectors.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    /// The configured class prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the theme holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve a dot path (`colors.red.500`) or raw key, with an optional
    /// ` / <modifier>` opacity suffix.
    ///
    /// `colors.red.500 / 50%` resolves the base path, then (when the value
    /// is a plain color) rewrites it to
    /// `color-mix(in oklab, <value> 50%, transparent)`.
    pub fn resolve_path(&self, path: &str) -> Option<String> {
        let (base, modifier) = match path.split_once('/') {
            Some((base, modifier)) => (base.trim_end(), Some(modifier.trim())),
            None => (path, None),
        };

        let key = if base.starts_with("--") {
            base.to_string()
        } else {
            dot_path_to_key(base)
        };

        let value = self.get(&key)?;

        match modifier {
            Some(pct) if is_color(value) => Some(format!(
                "color-mix(in oklab, {value} {}, transparent)",
                normalize_opacity(pct)
            )),
            Some(_) | None => Some(value.to_string()),
        }
    }
}

/// `colors.red.500` → `--color-red-500`.
fn dot_path_to_key(path: &str) -> String {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();

    let prefix = NAMESPACE_TABLE
        .iter()
        .find(|(ns, _)| *ns == first)
        .map(|(_, p)| (*p).to_string())
        .unwrap_or_else(|| format!("--{}", kebab_case(first)));

    let mut key = prefix;
    for segment in segments {
        key.push('-');
        key.push_str(segment);
    }
    key
}

fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Accept a percentage (`50%`) or a 0..=1 fraction (`0.5`).
fn normalize_opacity(modifier: &str) -> String {
    if modifier.ends_with('%') {
        return modifier.to_string();
    }
    match modifier.parse::<f64>() {
        Ok(n) if n <= 1.0 => format!("{}%", n * 100.0),
        _ => format!("{modifier}%"),
    }
}

fn normalize_key(key: String) -> String {
    if key.starts_with("--") {
        key
    } else {
        format!("--{key}")
    }
}

fn normalize_ref(key: &str) -> std::borrow::Cow<'_, str> {
    if key.starts_with("--") {
        std::borrow::Cow::Borrowed(key)
    } else {
        std::borrow::Cow::Owned(format!("--{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut theme = Theme::new();
        theme.add("--color-red-500", "#ef4444");
        theme.add("spacing-4", "1rem");

        assert_eq!(theme.get("--color-red-500"), Some("#ef4444"));
        assert_eq!(theme.get("color-red-500"), Some("#ef4444"));
        assert_eq!(theme.get("--spacing-4"), Some("1rem"));
        assert_eq!(theme.get("--missing"), None);
    }

    #[test]
    fn last_write_wins() {
        let mut theme = Theme::new();
        theme.add("--color-hot", "red");
        theme.add("--color-cold", "blue");
        theme.add("--color-hot", "crimson");

        assert_eq!(theme.get("--color-hot"), Some("crimson"));
        // Position is preserved.
        let ns = theme.namespace("--color");
        assert_eq!(ns, vec![("hot", "crimson"), ("cold", "blue")]);
    }

    #[test]
    fn namespace_enumeration() {
        let mut theme = Theme::new();
        theme.add("--color-red-500", "#ef4444");
        theme.add("--color-blue-500", "#3b82f6");
        theme.add("--colorful", "nope");
        theme.add("--spacing-4", "1rem");

        let ns = theme.namespace("--color");
        assert_eq!(ns, vec![("red-500", "#ef4444"), ("blue-500", "#3b82f6")]);
    }

    #[test]
    fn dot_path_resolution() {
        let mut theme = Theme::new();
        theme.add("--color-red-500", "#ef4444");
        theme.add("--font-size-lg", "1.125rem");

        assert_eq!(theme.resolve_path("colors.red.500").as_deref(), Some("#ef4444"));
        // Unknown namespace falls back to kebab-casing the first segment.
        assert_eq!(
            theme.resolve_path("fontSize.lg").as_deref(),
            None,
            "fontSize maps to --text, not --font-size"
        );
        assert_eq!(
            theme.resolve_path("--font-size-lg").as_deref(),
            Some("1.125rem")
        );
    }

    #[test]
    fn kebab_fallback() {
        let mut theme = Theme::new();
        theme.add("--aspect-ratio-video", "16 / 9");
        assert_eq!(
            theme.resolve_path("aspectRatio.video").as_deref(),
            Some("16 / 9")
        );
    }

    #[test]
    fn opacity_modifier_on_colors() {
        let mut theme = Theme::new();
        theme.add("--color-red-500", "#ef4444");
        theme.add("--spacing-4", "1rem");

        assert_eq!(
            theme.resolve_path("colors.red.500 / 50%").as_deref(),
            Some("color-mix(in oklab, #ef4444 50%, transparent)")
        );
        assert_eq!(
            theme.resolve_path("colors.red.500 / 0.5").as_deref(),
            Some("color-mix(in oklab, #ef4444 50%, transparent)")
        );
        // Non-color values ignore the modifier.
        assert_eq!(theme.resolve_path("spacing.4 / 50%").as_deref(), Some("1rem"));
    }

    #[test]
    fn prefix_round_trip() {
        let mut theme = Theme::new();
        assert_eq!(theme.prefix(), None);
        theme.set_prefix("tw");
        assert_eq!(theme.prefix(), Some("tw"));
    }
}
