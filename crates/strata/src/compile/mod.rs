//! Compilation entry point: theme source parsing, candidate matching,
//! rule assembly, ordering, and serialization.

use std::cell::RefCell;
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::candidate::parse_candidate;
use crate::css::CssNode;
use crate::error::Result;
use crate::plugin::{apply_plugins, PluginEntry};
use crate::registry::{UtilityRegistry, VariantRegistry};
use crate::theme::Theme;

pub mod escape;
pub mod matching;
pub mod order;
pub mod rule;
pub mod serialize;

pub use escape::{escape, unescape};
pub use matching::compile_candidate;
pub use order::compare;
pub use rule::{CompiledRule, Layer};

/// Compilation options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Seed the theme with the built-in default tokens.
    pub load_default_theme: bool,
    /// Extra theme tokens applied after the defaults and the `@theme`
    /// blocks in the source.
    pub theme: Vec<(String, String)>,
    /// Class prefix (`tw` makes the engine accept `tw-flex`).
    pub prefix: Option<String>,
    /// Memoize the last build. Builds are repeatable either way.
    pub cache_enabled: bool,
    /// Drop the memoized build after this long.
    pub cache_ttl: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            load_default_theme: true,
            theme: vec![],
            prefix: None,
            cache_enabled: true,
            cache_ttl: None,
        }
    }
}

/// Per-build diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Input class names seen.
    pub candidates: usize,
    /// Candidates that produced at least one rule.
    pub matched: usize,
    /// Candidates skipped as unparseable or unmatched.
    pub skipped: usize,
    /// Rules emitted after deduplication.
    pub rules: usize,
}

struct CachedBuild {
    key: u64,
    output: String,
    stats: CompileStats,
    at: Instant,
}

/// A ready-to-build compilation context.
///
/// The theme and registries are frozen once construction (including plugin
/// application) is done; `build` only reads them, so repeated builds over
/// the same class list are byte-identical.
pub struct Compiler {
    theme: Theme,
    utilities: UtilityRegistry,
    variants: VariantRegistry,
    base: Vec<CssNode>,
    components: Vec<CssNode>,
    options: Options,
    cache: RefCell<Option<CachedBuild>>,
}

/// Build a compilation context from CSS source and options.
///
/// `css_source` is scanned for `@theme { ... }` blocks; their custom
/// property declarations become theme tokens. Other rules, and malformed
/// declarations, are skipped with a warning logged.
///
/// Returns `Err` only for catastrophic errors (currently always returns Ok
/// due to error recovery).
pub fn compile(css_source: &str, options: Options) -> Result<Compiler> {
    let mut theme = Theme::new();
    let mut utilities = UtilityRegistry::new();
    let mut variants = VariantRegistry::new();

    if options.load_default_theme {
        crate::builtins::default_theme(&mut theme);
    }
    for (key, value) in parse_theme_source(css_source) {
        theme.add(key, value);
    }
    for (key, value) in &options.theme {
        theme.add(key.clone(), value.clone());
    }
    if let Some(prefix) = &options.prefix {
        theme.set_prefix(prefix.clone());
    }

    // Breakpoint variants read the theme, so the theme settles first.
    crate::builtins::register_defaults(&mut utilities, &mut variants, &theme)?;

    Ok(Compiler {
        theme,
        utilities,
        variants,
        base: vec![],
        components: vec![],
        options,
        cache: RefCell::new(None),
    })
}

impl Compiler {
    /// Apply plugins to the context. Consumes and returns the compiler so
    /// set-up reads as a pipeline.
    pub fn with_plugins(mut self, plugins: &[PluginEntry]) -> Result<Self> {
        apply_plugins(
            plugins,
            &mut self.theme,
            &mut self.utilities,
            &mut self.variants,
            &mut self.base,
            &mut self.components,
        )?;
        self.cache.replace(None);
        Ok(self)
    }

    /// The resolved theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Compile a class list to a stylesheet.
    ///
    /// Unknown classes are skipped; an all-unknown (or empty) list yields an
    /// empty string.
    pub fn build(&self, classes: &[&str]) -> String {
        self.build_with_stats(classes).0
    }

    /// Compile a class list, also reporting match diagnostics.
    pub fn build_with_stats(&self, classes: &[&str]) -> (String, CompileStats) {
        if let Some(hit) = self.cache_lookup(classes) {
            return hit;
        }

        let mut stats = CompileStats::default();
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for class in classes {
            stats.candidates += 1;
            let compiled = parse_candidate(
                class,
                &self.utilities,
                &self.variants,
                self.theme.prefix(),
            )
            .map(|candidate| {
                compile_candidate(&candidate, &self.theme, &self.utilities, &self.variants)
            })
            .unwrap_or_default();

            if compiled.is_empty() {
                stats.skipped += 1;
                tracing::debug!(class, "candidate matched nothing");
                continue;
            }
            stats.matched += 1;

            for rule in compiled {
                let key = (
                    rule.selector.clone(),
                    rule.at_rules.clone(),
                    rule.declarations.clone(),
                );
                if seen.insert(key) {
                    rules.push(rule);
                }
            }
        }

        // Stable sort: ties keep emission order.
        rules.sort_by(|a, b| {
            a.layer
                .cmp(&b.layer)
                .then_with(|| compare(&a.order_key, &b.order_key))
        });
        stats.rules = rules.len();

        let output = self.assemble(&rules);
        self.cache_store(classes, &output, stats);
        (output, stats)
    }

    fn assemble(&self, rules: &[CompiledRule]) -> String {
        let mut out = String::new();

        for (name, property) in self.utilities.properties() {
            let referenced = rules.iter().any(|rule| {
                rule.declarations
                    .iter()
                    .any(|d| d.property == name || d.value.contains(name))
            });
            if referenced {
                serialize::write_property(&mut out, name, property);
            }
        }

        for node in &self.base {
            serialize::write_node(&mut out, node);
        }
        for node in &self.components {
            serialize::write_node(&mut out, node);
        }
        for rule in rules {
            serialize::write_rule(&mut out, rule);
        }

        out
    }

    fn cache_key(classes: &[&str]) -> u64 {
        let mut hasher = DefaultHasher::new();
        classes.hash(&mut hasher);
        hasher.finish()
    }

    fn cache_lookup(&self, classes: &[&str]) -> Option<(String, CompileStats)> {
        if !self.options.cache_enabled {
            return None;
        }
        let cache = self.cache.borrow();
        let cached = cache.as_ref()?;
        if cached.key != Self::cache_key(classes) {
            return None;
        }
        if let Some(ttl) = self.options.cache_ttl {
            if cached.at.elapsed() > ttl {
                return None;
            }
        }
        Some((cached.output.clone(), cached.stats))
    }

    fn cache_store(&self, classes: &[&str], output: &str, stats: CompileStats) {
        if !self.options.cache_enabled {
            return;
        }
        self.cache.replace(Some(CachedBuild {
            key: Self::cache_key(classes),
            output: output.to_string(),
            stats,
            at: Instant::now(),
        }));
    }
}

/// Extract `@theme` custom-property declarations from CSS source.
fn parse_theme_source(css: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut tokens = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let is_theme = matches!(parser.next(), Ok(Token::AtKeyword(name)) if name.as_ref() == "theme");
        if !is_theme {
            skip_to_next_rule(&mut parser);
            continue;
        }

        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let parsed = parser.parse_nested_block(|block| {
                    parse_theme_declarations(block, &mut tokens);
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                if let Err(e) = parsed {
                    tracing::warn!("theme block parse error: {e:?}");
                }
            }
            _ => {
                tracing::warn!("expected '{{' after @theme");
                skip_to_next_rule(&mut parser);
            }
        }
    }

    tokens
}

fn parse_theme_declarations(parser: &mut Parser<'_, '_>, tokens: &mut Vec<(String, String)>) {
    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        // Reset before recovering so a semicolon consumed by a failed
        // expect_* is re-seen by skip_declaration and terminates only the
        // malformed declaration, not the one after it.
        let before_ident = parser.state();
        let name = match parser.expect_ident() {
            Ok(name) => name.to_string(),
            Err(_) => {
                parser.reset(&before_ident);
                skip_declaration(parser);
                continue;
            }
        };

        let before_colon = parser.state();
        if parser.expect_colon().is_err() {
            tracing::warn!(name, "expected ':' in theme declaration");
            parser.reset(&before_colon);
            skip_declaration(parser);
            continue;
        }

        parser.skip_whitespace();
        let start = parser.position();
        let consumed = parser.parse_until_before(cssparser::Delimiter::Semicolon, |value| {
            while !value.is_exhausted() {
                value.next()?;
            }
            Ok::<_, CssParseError<'_, ()>>(())
        });
        if consumed.is_err() {
            skip_declaration(parser);
            continue;
        }
        let value = parser.slice_from(start).trim().to_string();
        let _ = parser.try_parse(|p| p.expect_semicolon());

        if name.starts_with("--") && !value.is_empty() {
            tokens.push((name, value));
        } else {
            tracing::warn!(name, "skipping non-custom-property theme declaration");
        }
    }
}

fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|p| {
                    while !p.is_exhausted() {
                        let _ = p.next();
                    }
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                return;
            }
            Err(_) => return,
            _ => {}
        }
    }
}

fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_blocks_are_extracted() {
        let css = "@theme { --color-mint-500: oklch(0.72 0.11 178); --spacing: 0.25rem; }";
        let tokens = parse_theme_source(css);
        assert_eq!(
            tokens,
            vec![
                (
                    "--color-mint-500".to_string(),
                    "oklch(0.72 0.11 178)".to_string()
                ),
                ("--spacing".to_string(), "0.25rem".to_string()),
            ]
        );
    }

    #[test]
    fn non_theme_rules_are_skipped() {
        let css = "body { margin: 0; } @media (width >= 40rem) { .x { color: red; } } @theme { --blur-sm: 8px; }";
        let tokens = parse_theme_source(css);
        assert_eq!(tokens, vec![("--blur-sm".to_string(), "8px".to_string())]);
    }

    #[test]
    fn malformed_declarations_are_recovered() {
        let css = "@theme { nonsense; --ok: 1rem; color: red; --also-ok: 2rem; }";
        let tokens = parse_theme_source(css);
        assert_eq!(
            tokens,
            vec![
                ("--ok".to_string(), "1rem".to_string()),
                ("--also-ok".to_string(), "2rem".to_string()),
            ]
        );
    }

    #[test]
    fn stray_tokens_do_not_swallow_the_next_declaration() {
        let css = "@theme { ; --a: 1rem; 5px; --b: 2rem; }";
        let tokens = parse_theme_source(css);
        assert_eq!(
            tokens,
            vec![
                ("--a".to_string(), "1rem".to_string()),
                ("--b".to_string(), "2rem".to_string()),
            ]
        );
    }

    #[test]
    fn function_values_keep_raw_text() {
        let css = "@theme { --shadow-md: 0 4px 6px -1px rgb(0 0 0 / 0.1); }";
        let tokens = parse_theme_source(css);
        assert_eq!(tokens[0].1, "0 4px 6px -1px rgb(0 0 0 / 0.1)");
    }

    #[test]
    fn later_theme_blocks_override_earlier() {
        let compiler = compile(
            "@theme { --color-hot: red; } @theme { --color-hot: crimson; }",
            Options::default(),
        )
        .unwrap();
        assert_eq!(compiler.theme().get("--color-hot"), Some("crimson"));
    }

    #[test]
    fn options_theme_seed_wins_over_source() {
        let compiler = compile(
            "@theme { --color-hot: red; }",
            Options {
                theme: vec![("--color-hot".to_string(), "tomato".to_string())],
                ..Options::default()
            },
        )
        .unwrap();
        assert_eq!(compiler.theme().get("--color-hot"), Some("tomato"));
    }

    #[test]
    fn builds_are_idempotent() {
        let compiler = compile("", Options::default()).unwrap();
        let classes = ["flex", "hover:underline", "p-4"];
        assert_eq!(compiler.build(&classes), compiler.build(&classes));

        let uncached = compile(
            "",
            Options {
                cache_enabled: false,
                ..Options::default()
            },
        )
        .unwrap();
        assert_eq!(uncached.build(&classes), compiler.build(&classes));
    }

    #[test]
    fn stats_count_skipped_candidates() {
        let compiler = compile("", Options::default()).unwrap();
        let (_, stats) = compiler.build_with_stats(&["flex", "no-such-thing", "flex"]);
        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.skipped, 1);
        // The duplicate collapses.
        assert_eq!(stats.rules, 1);
    }
}
