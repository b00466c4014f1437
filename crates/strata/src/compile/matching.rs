//! Candidate matching: parsed candidates become compiled rules.
//!
//! Matching is total over invalid input. A candidate that resolves to no
//! registered utility, or whose value fails type checks, yields an empty
//! rule set rather than an error.

use crate::candidate::{Candidate, Modifier, UtilityRef, Value, Variant};
use crate::compile::escape::escape;
use crate::compile::rule::CompiledRule;
use crate::css::Declaration;
use crate::registry::{FunctionalUtility, UtilityRegistry, ValueDef, VariantRegistry, Wrapper};
use crate::theme::Theme;
use crate::value::{
    has_math_fn, infer_data_type, is_valid_opacity_value, is_valid_spacing_multiplier, DataType,
};

/// Resolve one candidate against the theme and registries.
///
/// Returns one rule per wrapper combination (static variants may expand
/// into several wrappers). An empty vector means the candidate matched
/// nothing.
pub fn compile_candidate(
    candidate: &Candidate,
    theme: &Theme,
    utilities: &UtilityRegistry,
    variants: &VariantRegistry,
) -> Vec<CompiledRule> {
    let Some(mut declarations) = resolve_declarations(candidate, theme, utilities) else {
        return vec![];
    };

    if candidate.important {
        for decl in &mut declarations {
            decl.value.push_str(" !important");
        }
    }

    let base = format!(".{}", escape(&candidate.raw));
    let mut rules = vec![(base, Vec::<String>::new())];

    // Variants apply innermost-first; the first variant in the chain ends up
    // wrapping outermost.
    for variant in candidate.variants.iter().rev() {
        let Some(wrappers) = resolve_variant(variant, variants) else {
            return vec![];
        };
        let mut next = Vec::with_capacity(rules.len() * wrappers.len());
        for (selector, at_rules) in &rules {
            for wrapper in &wrappers {
                let selector = match &wrapper.selector {
                    Some(template) => template.replace('&', selector),
                    None => selector.clone(),
                };
                let mut at_rules = at_rules.clone();
                if let Some(at_rule) = &wrapper.at_rule {
                    at_rules.push(at_rule.clone());
                }
                next.push((selector, at_rules));
            }
        }
        rules = next;
    }

    rules
        .into_iter()
        .map(|(selector, mut at_rules)| {
            // Built inner-first; the serializer expects outermost first.
            at_rules.reverse();
            CompiledRule::utility(selector, at_rules, declarations.clone(), candidate.raw.as_str())
        })
        .collect()
}

fn resolve_declarations(
    candidate: &Candidate,
    theme: &Theme,
    utilities: &UtilityRegistry,
) -> Option<Vec<Declaration>> {
    match &candidate.root {
        UtilityRef::Static(name) => {
            if candidate.negative || candidate.modifier.is_some() {
                return None;
            }
            utilities.get_static(name).map(<[Declaration]>::to_vec)
        }
        UtilityRef::ArbitraryProperty { property, value } => {
            if candidate.negative || candidate.modifier.is_some() {
                return None;
            }
            Some(vec![Declaration::new(property.clone(), value.clone())])
        }
        UtilityRef::Functional { name, value } => {
            let utility = utilities.get_functional(name)?;
            if candidate.negative && !utility.supports_negative {
                return None;
            }

            let modifier = match &candidate.modifier {
                Some(modifier) => {
                    // A `/modifier` means nothing on a utility that is
                    // neither color-typed nor carrying a modifier table.
                    if !utility.is_color_utility() && utility.modifiers.is_none() {
                        return None;
                    }
                    Some(resolve_modifier(modifier, utility)?)
                }
                None => None,
            };

            let mut resolved = resolve_value(value.as_ref(), utility, theme)?;

            if candidate.negative {
                if !is_negatable(&resolved) {
                    return None;
                }
                resolved = format!("calc({resolved} * -1)");
            }
            if let (true, Some(pct)) = (utility.is_color_utility(), modifier.as_deref()) {
                resolved = format!("color-mix(in oklab, {resolved} {pct}, transparent)");
            }

            utility.generate(&resolved, modifier.as_deref())
        }
    }
}

/// Resolve a utility value to its final CSS string.
fn resolve_value(
    value: Option<&Value>,
    utility: &FunctionalUtility,
    theme: &Theme,
) -> Option<String> {
    match value {
        None => resolve_value_def(utility.values.get("DEFAULT")?, theme),
        Some(Value::Bare(key)) => resolve_value_def(utility.values.get(key)?, theme),
        Some(Value::ThemeKey(key)) => {
            for ns in &utility.namespaces {
                let full = format!("{ns}-{key}");
                if theme.contains(&full) {
                    return Some(format!("var({full})"));
                }
            }
            // Spacing-scale utilities accept bare multiples of 0.25.
            if utility.namespaces.iter().any(|ns| ns == "--spacing")
                && is_valid_spacing_multiplier(key)
                && theme.contains("--spacing")
            {
                return Some(format!("calc(var(--spacing) * {key})"));
            }
            // Fractions only arrive through `Value::Fraction`; a raw `1/2`
            // here means the lookup above already failed.
            if utility
                .types
                .iter()
                .any(|t| !matches!(t, DataType::Any | DataType::Fraction) && t.matches(key))
            {
                return Some(key.to_string());
            }
            None
        }
        Some(Value::Fraction {
            numerator,
            denominator,
        }) => Some(format!("calc({numerator} / {denominator} * 100%)")),
        Some(Value::Arbitrary { value, type_hint }) => {
            if !value_type_allowed(value, type_hint.as_deref(), utility) {
                return None;
            }
            Some(value.clone())
        }
    }
}

/// Only dimension-like values can be negated. Keyword values such as
/// `auto` or `none` fail the candidate instead of producing
/// `calc(auto * -1)`.
fn is_negatable(value: &str) -> bool {
    value.contains("var(")
        || has_math_fn(value)
        || [
            DataType::Number,
            DataType::Length,
            DataType::Percentage,
            DataType::Angle,
        ]
        .iter()
        .any(|t| t.matches(value))
}

fn resolve_value_def(def: &ValueDef, theme: &Theme) -> Option<String> {
    match def {
        ValueDef::Literal(value) => Some(value.clone()),
        ValueDef::Theme(key) => {
            if theme.contains(key) {
                Some(format!("var({key})"))
            } else {
                None
            }
        }
    }
}

/// Type-check an arbitrary value against the utility's declared types.
fn value_type_allowed(value: &str, hint: Option<&str>, utility: &FunctionalUtility) -> bool {
    if utility.types.is_empty() || utility.types.contains(&DataType::Any) {
        return true;
    }
    if let Some(hint) = hint {
        return match DataType::from_hint(hint) {
            Some(ty) => utility.types.contains(&ty),
            None => false,
        };
    }
    // Values built on var() cannot be classified statically.
    if value.contains("var(") {
        return true;
    }
    infer_data_type(value, &utility.types).is_some()
}

/// Resolve `/modifier` to the string handed to the generator.
///
/// A named modifier resolves through the utility's modifier table first,
/// then as a bare 0..=100 opacity. A modifier that resolves to nothing
/// invalidates the whole candidate.
fn resolve_modifier(modifier: &Modifier, utility: &FunctionalUtility) -> Option<String> {
    match modifier {
        Modifier::Arbitrary(value) => Some(value.clone()),
        Modifier::Named(name) => {
            if let Some(table) = &utility.modifiers {
                if let Some(value) = table.get(name) {
                    return Some(value.clone());
                }
            }
            if is_valid_opacity_value(name) {
                return Some(format!("{name}%"));
            }
            None
        }
    }
}

fn resolve_variant(variant: &Variant, variants: &VariantRegistry) -> Option<Vec<Wrapper>> {
    match variant {
        Variant::Static(name) => variants.get_static(name).map(<[Wrapper]>::to_vec),
        Variant::Functional { name, value } => {
            let value = variant_value(value.as_ref())?;
            variants
                .generate_functional(name, &value)
                .map(|w| vec![w])
        }
        Variant::Arbitrary(template) => {
            if template.starts_with('@') {
                Some(vec![Wrapper::at_rule(template.clone())])
            } else if template.contains('&') {
                Some(vec![Wrapper::selector(template.clone())])
            } else {
                None
            }
        }
        Variant::Compound {
            name,
            inner,
            modifier,
        } => {
            // In compound position a bare arbitrary selector is relative
            // to the element, so `has-[.active]` reads as `&.active`
            // before the compound rewrites it.
            let inner_wrappers = match inner.as_ref() {
                Variant::Arbitrary(template)
                    if !template.starts_with('@') && !template.contains('&') =>
                {
                    vec![Wrapper::selector(format!("&{template}"))]
                }
                inner => resolve_variant(inner, variants)?,
            };
            let modifier = modifier.as_ref().map(|m| match m {
                Modifier::Named(v) | Modifier::Arbitrary(v) => v.as_str(),
            });
            let mut out = Vec::with_capacity(inner_wrappers.len());
            for inner in &inner_wrappers {
                out.push(variants.generate_compound(name, inner, modifier)?);
            }
            Some(out)
        }
    }
}

fn variant_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::ThemeKey(v) | Value::Bare(v) => Some(v.clone()),
        Value::Arbitrary { value, .. } => Some(value.clone()),
        Value::Fraction {
            numerator,
            denominator,
        } => Some(format!("{numerator}/{denominator}")),
    }
}
