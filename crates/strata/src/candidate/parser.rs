//! Candidate parsing.
//!
//! Converts one raw class-name token into a [`Candidate`]. Parsing never
//! fails loudly: an unparseable token is simply not a utility, and the
//! caller drops it. This mirrors the best-effort semantics a content
//! scanner needs, where most extracted strings are not class names at all.

use super::types::{Candidate, Modifier, UtilityRef, Value, Variant};
use crate::registry::{UtilityRegistry, VariantRegistry};
use crate::segment::{last_index_of, segment};
use crate::value::{
    add_whitespace_around_math_operators, decode_arbitrary_value, is_valid_arbitrary, DataType,
};
use crate::value::classify::is_number;

/// Parse one token against the registries.
///
/// `prefix` is the configured class prefix; when set, only tokens whose
/// utility begins with `<prefix>-` parse (the leading `-` of a negative
/// candidate comes before the prefix: `-tw-mt-4`).
pub fn parse_candidate(
    input: &str,
    utilities: &UtilityRegistry,
    variants: &VariantRegistry,
    prefix: Option<&str>,
) -> Option<Candidate> {
    let mut token = input;

    // Trailing important marker.
    let important = token.len() > 1 && token.ends_with('!') && !token.ends_with("\\!");
    if important {
        token = &token[..token.len() - 1];
    }

    // Variant chain, leftmost outermost.
    let mut segments = segment(token, ':');
    let root_segment = segments.pop()?;
    if root_segment.is_empty() {
        return None;
    }

    let mut parsed_variants = Vec::with_capacity(segments.len());
    for seg in &segments {
        parsed_variants.push(parse_variant(seg, variants)?);
    }

    // Negative marker. A bare `-` is not a utility.
    let (negative, rest) = match root_segment.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => (true, rest),
        Some(_) => return None,
        None => (false, root_segment),
    };

    // Class prefix, when configured.
    let rest = match prefix {
        Some(p) => rest
            .strip_prefix(p)
            .and_then(|r| r.strip_prefix('-'))
            .filter(|r| !r.is_empty())?,
        None => rest,
    };

    // Optional `/modifier`, split at the last top-level slash. A fraction
    // value (`w-1/2`) lands in the modifier slot here and is reclaimed
    // during value parsing.
    let (root, mut modifier) = match last_index_of(rest, '/') {
        Some(idx) => (&rest[..idx], Some(parse_modifier(&rest[idx + 1..])?)),
        None => (rest, None),
    };

    let root = parse_root(root, utilities, negative, &mut modifier)?;

    Some(Candidate {
        raw: input.to_string(),
        variants: parsed_variants,
        negative,
        important,
        root,
        modifier,
    })
}

fn parse_root(
    root: &str,
    utilities: &UtilityRegistry,
    negative: bool,
    modifier: &mut Option<Modifier>,
) -> Option<UtilityRef> {
    // `[property:value]` arbitrary property.
    if let Some(inner) = root.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        let (property, value) = inner.split_once(':')?;
        if negative || !is_property_name(property) {
            return None;
        }
        let value = value.trim();
        if value.is_empty() || !is_valid_arbitrary(value) {
            return None;
        }
        return Some(UtilityRef::ArbitraryProperty {
            property: property.to_string(),
            value: decode_value(value),
        });
    }

    // Exact static name. Static utilities take no value, no modifier, and
    // no negative form.
    if utilities.is_static(root) {
        if negative || modifier.is_some() {
            return None;
        }
        return Some(UtilityRef::Static(root.to_string()));
    }

    // Functional `name-value` by longest known prefix.
    let (name, rest) = utilities.prefix_match(root)?;
    let util = utilities.get_functional(name)?;
    if negative && !util.supports_negative {
        return None;
    }

    let value = match rest {
        None => None,
        Some(rest) => Some(parse_utility_value(rest, name, utilities, modifier)?),
    };

    Some(UtilityRef::Functional {
        name: name.to_string(),
        value,
    })
}

fn parse_utility_value(
    rest: &str,
    utility: &str,
    utilities: &UtilityRegistry,
    modifier: &mut Option<Modifier>,
) -> Option<Value> {
    // `[...]` arbitrary value, optionally hinted: `[length:var(--x)]`.
    if let Some(inner) = rest.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        if inner.is_empty() || !is_valid_arbitrary(inner) {
            return None;
        }
        let (hint, value) = split_type_hint(inner);
        return Some(Value::Arbitrary {
            value: decode_value(value),
            type_hint: hint.map(str::to_string),
        });
    }

    // `(--x)` custom-property shorthand for `[var(--x)]`.
    if let Some(inner) = rest.strip_prefix('(') {
        let inner = inner.strip_suffix(')')?;
        let (hint, var) = split_type_hint(inner);
        if !var.starts_with("--") || !is_valid_arbitrary(var) {
            return None;
        }
        return Some(Value::Arbitrary {
            value: format!("var({var})"),
            type_hint: hint.map(str::to_string),
        });
    }

    // `w-1/2`: the modifier slot holds the denominator of a fraction when
    // the utility accepts one.
    if is_number(rest) {
        if let Some(Modifier::Named(den)) = modifier.as_ref() {
            let accepts_fraction = utilities
                .get_functional(utility)
                .is_some_and(|u| u.types.contains(&DataType::Fraction));
            if accepts_fraction && is_number(den) {
                let den = den.clone();
                *modifier = None;
                return Some(Value::Fraction {
                    numerator: rest.to_string(),
                    denominator: den,
                });
            }
        }
    }

    // Named value: table entries are bare, everything else resolves through
    // the theme.
    let in_table = utilities
        .get_functional(utility)
        .is_some_and(|u| u.values.contains_key(rest));
    if in_table {
        Some(Value::Bare(rest.to_string()))
    } else {
        Some(Value::ThemeKey(rest.to_string()))
    }
}

/// `color:red` → `(Some("color"), "red")` when the prefix is a known type
/// hint; otherwise no hint.
fn split_type_hint(inner: &str) -> (Option<&str>, &str) {
    if let Some((hint, value)) = inner.split_once(':') {
        if DataType::from_hint(hint).is_some() {
            return (Some(hint), value);
        }
    }
    (None, inner)
}

fn parse_modifier(raw: &str) -> Option<Modifier> {
    if raw.is_empty() {
        return None;
    }
    if let Some(inner) = raw.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        if inner.is_empty() || !is_valid_arbitrary(inner) {
            return None;
        }
        return Some(Modifier::Arbitrary(decode_value(inner)));
    }
    if let Some(inner) = raw.strip_prefix('(') {
        let inner = inner.strip_suffix(')')?;
        if !inner.starts_with("--") || !is_valid_arbitrary(inner) {
            return None;
        }
        return Some(Modifier::Arbitrary(format!("var({inner})")));
    }
    Some(Modifier::Named(raw.to_string()))
}

fn parse_variant(seg: &str, variants: &VariantRegistry) -> Option<Variant> {
    if seg.is_empty() {
        return None;
    }

    // `[...]` arbitrary variant: an at-rule or a selector template.
    if let Some(inner) = seg.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        if inner.is_empty() || !is_valid_arbitrary(inner) {
            return None;
        }
        return Some(Variant::Arbitrary(decode_arbitrary_value(inner)));
    }

    // Optional `/modifier` (scoped compound name: `group-hover/sidebar`).
    let (base, modifier) = match last_index_of(seg, '/') {
        Some(idx) => (&seg[..idx], Some(parse_modifier(&seg[idx + 1..])?)),
        None => (seg, None),
    };

    if modifier.is_none() && variants.is_static(base) {
        return Some(Variant::Static(base.to_string()));
    }

    let (name, rest) = variants.prefix_match(base)?;

    if variants.is_compound(name) {
        let inner = parse_variant(rest, variants)?;
        return Some(Variant::Compound {
            name: name.to_string(),
            inner: Box::new(inner),
            modifier,
        });
    }

    // Functional variants take no modifier.
    if modifier.is_some() {
        return None;
    }

    let value = if let Some(inner) = rest.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        if inner.is_empty() || !is_valid_arbitrary(inner) {
            return None;
        }
        Value::Arbitrary {
            value: decode_value(inner),
            type_hint: None,
        }
    } else {
        Value::ThemeKey(rest.to_string())
    };

    Some(Variant::Functional {
        name: name.to_string(),
        value: Some(value),
    })
}

/// Whether `name` can be a CSS property: an identifier or a custom
/// property.
fn is_property_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let rest = name.strip_prefix("--").unwrap_or(name);
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn decode_value(value: &str) -> String {
    add_whitespace_around_math_operators(&decode_arbitrary_value(value))
}
