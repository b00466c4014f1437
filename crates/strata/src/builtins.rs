//! Built-in theme tokens, core utilities, and core variants.
//!
//! This is a working core table, not an exhaustive one: enough coverage for
//! layout, spacing, color, and the common state variants. Everything else
//! arrives through plugins.

use crate::compile::escape::escape;
use crate::css::Declaration;
use crate::error::Result;
use crate::registry::{
    CustomProperty, FunctionalUtility, UtilityRegistry, ValueDef, VariantRegistry, Wrapper,
};
use crate::theme::Theme;
use crate::value::classify::is_number;
use crate::value::DataType;

/// Seed the default design tokens.
pub fn default_theme(theme: &mut Theme) {
    let tokens: &[(&str, &str)] = &[
        ("--spacing", "0.25rem"),
        ("--breakpoint-sm", "40rem"),
        ("--breakpoint-md", "48rem"),
        ("--breakpoint-lg", "64rem"),
        ("--breakpoint-xl", "80rem"),
        ("--breakpoint-2xl", "96rem"),
        ("--color-white", "#fff"),
        ("--color-black", "#000"),
        ("--color-transparent", "transparent"),
        ("--color-red-500", "oklch(63.7% 0.237 25.331)"),
        ("--color-red-600", "oklch(57.7% 0.245 27.325)"),
        ("--color-blue-500", "oklch(62.3% 0.214 259.815)"),
        ("--color-blue-600", "oklch(54.6% 0.245 262.881)"),
        ("--color-green-500", "oklch(72.3% 0.219 149.579)"),
        ("--color-gray-100", "oklch(96.7% 0.003 264.542)"),
        ("--color-gray-500", "oklch(55.1% 0.027 264.364)"),
        ("--color-gray-900", "oklch(21% 0.034 264.665)"),
        ("--radius-sm", "0.25rem"),
        ("--radius-md", "0.375rem"),
        ("--radius-lg", "0.5rem"),
        ("--radius-xl", "0.75rem"),
        ("--order-first", "-9999"),
        ("--order-last", "9999"),
    ];
    for (key, value) in tokens {
        theme.add(*key, *value);
    }
}

/// Register the core utility and variant tables.
///
/// Breakpoint variants come from the theme's `--breakpoint` namespace, so
/// this runs after the theme is fully resolved.
pub fn register_defaults(
    utilities: &mut UtilityRegistry,
    variants: &mut VariantRegistry,
    theme: &Theme,
) -> Result<()> {
    register_static_utilities(utilities)?;
    register_functional_utilities(utilities)?;
    register_variants(variants, theme)?;
    Ok(())
}

fn register_static_utilities(utilities: &mut UtilityRegistry) -> Result<()> {
    let singles: &[(&str, &str, &str)] = &[
        ("block", "display", "block"),
        ("inline-block", "display", "inline-block"),
        ("inline", "display", "inline"),
        ("flex", "display", "flex"),
        ("inline-flex", "display", "inline-flex"),
        ("grid", "display", "grid"),
        ("hidden", "display", "none"),
        ("static", "position", "static"),
        ("relative", "position", "relative"),
        ("absolute", "position", "absolute"),
        ("fixed", "position", "fixed"),
        ("sticky", "position", "sticky"),
        ("order-first", "order", "var(--order-first)"),
        ("order-last", "order", "var(--order-last)"),
        ("order-none", "order", "0"),
        ("underline", "text-decoration-line", "underline"),
        ("line-through", "text-decoration-line", "line-through"),
        ("no-underline", "text-decoration-line", "none"),
        ("italic", "font-style", "italic"),
        ("not-italic", "font-style", "normal"),
        ("font-normal", "font-weight", "400"),
        ("font-medium", "font-weight", "500"),
        ("font-semibold", "font-weight", "600"),
        ("font-bold", "font-weight", "700"),
        ("uppercase", "text-transform", "uppercase"),
        ("lowercase", "text-transform", "lowercase"),
        ("capitalize", "text-transform", "capitalize"),
        ("text-left", "text-align", "left"),
        ("text-center", "text-align", "center"),
        ("text-right", "text-align", "right"),
        ("items-start", "align-items", "flex-start"),
        ("items-center", "align-items", "center"),
        ("items-end", "align-items", "flex-end"),
        ("justify-start", "justify-content", "flex-start"),
        ("justify-center", "justify-content", "center"),
        ("justify-end", "justify-content", "flex-end"),
        ("justify-between", "justify-content", "space-between"),
        ("flex-row", "flex-direction", "row"),
        ("flex-col", "flex-direction", "column"),
        ("flex-wrap", "flex-wrap", "wrap"),
        ("overflow-hidden", "overflow", "hidden"),
        ("overflow-auto", "overflow", "auto"),
        ("cursor-pointer", "cursor", "pointer"),
        ("select-none", "user-select", "none"),
    ];
    for (name, property, value) in singles {
        utilities.add_static(*name, vec![Declaration::new(*property, *value)])?;
    }

    utilities.add_static(
        "truncate",
        vec![
            Declaration::new("overflow", "hidden"),
            Declaration::new("text-overflow", "ellipsis"),
            Declaration::new("white-space", "nowrap"),
        ],
    )?;
    utilities.add_static(
        "sr-only",
        vec![
            Declaration::new("position", "absolute"),
            Declaration::new("width", "1px"),
            Declaration::new("height", "1px"),
            Declaration::new("padding", "0"),
            Declaration::new("margin", "-1px"),
            Declaration::new("overflow", "hidden"),
            Declaration::new("clip-path", "inset(50%)"),
            Declaration::new("white-space", "nowrap"),
        ],
    )?;

    // Border styles share an engine-owned custom property so `border-<width>`
    // can pick the last set style back up.
    utilities.add_property(
        "--tw-border-style",
        CustomProperty {
            syntax: "\"*\"".to_string(),
            inherits: false,
            initial_value: Some("solid".to_string()),
        },
    );
    for style in ["solid", "dashed", "dotted", "double", "none"] {
        utilities.add_static(
            format!("border-{style}"),
            vec![
                Declaration::new("--tw-border-style", style),
                Declaration::new("border-style", style),
            ],
        )?;
    }

    Ok(())
}

fn spacing(name: &str, properties: &[&str]) -> (String, FunctionalUtility) {
    (
        name.to_string(),
        FunctionalUtility::for_properties(properties)
            .types(&[DataType::Length, DataType::Percentage])
            .namespace("--spacing"),
    )
}

fn register_functional_utilities(utilities: &mut UtilityRegistry) -> Result<()> {
    let paddings = [
        spacing("p", &["padding"]),
        spacing("px", &["padding-inline"]),
        spacing("py", &["padding-block"]),
        spacing("pt", &["padding-top"]),
        spacing("pr", &["padding-right"]),
        spacing("pb", &["padding-bottom"]),
        spacing("pl", &["padding-left"]),
        spacing("gap", &["gap"]),
        spacing("gap-x", &["column-gap"]),
        spacing("gap-y", &["row-gap"]),
    ];
    for (name, utility) in paddings {
        utilities.add_functional(name, utility)?;
    }

    let margins = [
        ("m", "margin"),
        ("mx", "margin-inline"),
        ("my", "margin-block"),
        ("mt", "margin-top"),
        ("mr", "margin-right"),
        ("mb", "margin-bottom"),
        ("ml", "margin-left"),
        ("inset", "inset"),
        ("top", "top"),
        ("right", "right"),
        ("bottom", "bottom"),
        ("left", "left"),
    ];
    for (name, property) in margins {
        let (name, utility) = spacing(name, &[property]);
        utilities.add_functional(
            name,
            utility
                .negative()
                .value("auto", ValueDef::Literal("auto".to_string())),
        )?;
    }

    for (name, property) in [("w", "width"), ("h", "height")] {
        utilities.add_functional(
            name,
            FunctionalUtility::for_properties(&[property])
                .types(&[DataType::Fraction, DataType::Length, DataType::Percentage])
                .namespace("--spacing")
                .value("full", ValueDef::Literal("100%".to_string()))
                .value("auto", ValueDef::Literal("auto".to_string()))
                .value("min", ValueDef::Literal("min-content".to_string()))
                .value("max", ValueDef::Literal("max-content".to_string()))
                .value("fit", ValueDef::Literal("fit-content".to_string()))
                .value(
                    "screen",
                    ValueDef::Literal(if property == "width" { "100vw" } else { "100vh" }.to_string()),
                ),
        )?;
    }

    for (name, property) in [
        ("bg", "background-color"),
        ("text", "color"),
        ("border", "border-color"),
    ] {
        utilities.add_functional(
            name,
            FunctionalUtility::for_properties(&[property])
                .types(&[DataType::Color])
                .namespace("--color")
                .value("current", ValueDef::Literal("currentcolor".to_string()))
                .value("inherit", ValueDef::Literal("inherit".to_string())),
        )?;
    }

    utilities.add_functional(
        "order",
        FunctionalUtility::for_properties(&["order"])
            .types(&[DataType::Number])
            .negative(),
    )?;
    utilities.add_functional(
        "z",
        FunctionalUtility::for_properties(&["z-index"])
            .types(&[DataType::Number])
            .negative()
            .value("auto", ValueDef::Literal("auto".to_string())),
    )?;

    utilities.add_functional(
        "opacity",
        FunctionalUtility::new(|value, _| {
            let value = if is_number(value) {
                format!("{value}%")
            } else {
                value.to_string()
            };
            Some(vec![Declaration::new("opacity", value)])
        })
        .types(&[DataType::Number, DataType::Percentage]),
    )?;

    utilities.add_functional(
        "rounded",
        FunctionalUtility::for_properties(&["border-radius"])
            .types(&[DataType::Length, DataType::Percentage])
            .namespace("--radius")
            .value("DEFAULT", ValueDef::Theme("--radius-md".to_string()))
            .value("none", ValueDef::Literal("0".to_string()))
            .value(
                "full",
                ValueDef::Literal("calc(infinity * 1px)".to_string()),
            ),
    )?;

    Ok(())
}

fn register_variants(variants: &mut VariantRegistry, theme: &Theme) -> Result<()> {
    let pseudo_classes = [
        ("hover", "&:hover"),
        ("focus", "&:focus"),
        ("focus-within", "&:focus-within"),
        ("focus-visible", "&:focus-visible"),
        ("active", "&:active"),
        ("visited", "&:visited"),
        ("disabled", "&:disabled"),
        ("enabled", "&:enabled"),
        ("checked", "&:checked"),
        ("required", "&:required"),
        ("first", "&:first-child"),
        ("last", "&:last-child"),
        ("only", "&:only-child"),
        ("odd", "&:nth-child(odd)"),
        ("even", "&:nth-child(even)"),
        ("empty", "&:empty"),
        ("before", "&::before"),
        ("after", "&::after"),
        ("placeholder", "&::placeholder"),
        ("selection", "&::selection"),
        ("first-letter", "&::first-letter"),
        ("first-line", "&::first-line"),
    ];
    for (name, template) in pseudo_classes {
        variants.add_static(name, Wrapper::selector(template))?;
    }

    // ::marker must also reach markers on list children.
    variants.add_static_multi(
        "marker",
        vec![
            Wrapper::selector("& *::marker"),
            Wrapper::selector("&::marker"),
        ],
    )?;

    variants.add_static("dark", Wrapper::at_rule("@media (prefers-color-scheme: dark)"))?;
    variants.add_static("print", Wrapper::at_rule("@media print"))?;
    variants.add_static(
        "motion-safe",
        Wrapper::at_rule("@media (prefers-reduced-motion: no-preference)"),
    )?;
    variants.add_static(
        "motion-reduce",
        Wrapper::at_rule("@media (prefers-reduced-motion: reduce)"),
    )?;

    for (suffix, value) in theme.namespace("--breakpoint") {
        variants.add_static(suffix, Wrapper::at_rule(format!("@media (width >= {value})")))?;
        variants.add_static(
            format!("max-{suffix}"),
            Wrapper::at_rule(format!("@media (width < {value})")),
        )?;
    }

    variants.add_functional("min", |value| {
        Some(Wrapper::at_rule(format!("@media (width >= {value})")))
    })?;
    variants.add_functional("supports", |value| {
        let condition = if value.starts_with('(') {
            value.to_string()
        } else if value.contains(':') {
            format!("({value})")
        } else {
            format!("({value}: initial)")
        };
        Some(Wrapper::at_rule(format!("@supports {condition}")))
    })?;
    variants.add_functional("aria", |value| {
        if value.contains('=') {
            Some(Wrapper::selector(format!("&[aria-{value}]")))
        } else {
            Some(Wrapper::selector(format!("&[aria-{value}=\"true\"]")))
        }
    })?;
    variants.add_functional("data", |value| {
        Some(Wrapper::selector(format!("&[data-{value}]")))
    })?;

    variants.add_compound("group", |inner, modifier| {
        let suffix = inner.selector.as_ref()?.strip_prefix('&')?.to_string();
        let scope = scope_class("group", modifier);
        Some(Wrapper::selector(format!("&:is(:where({scope}){suffix} *)")))
    })?;
    variants.add_compound("peer", |inner, modifier| {
        let suffix = inner.selector.as_ref()?.strip_prefix('&')?.to_string();
        let scope = scope_class("peer", modifier);
        Some(Wrapper::selector(format!("&:is(:where({scope}){suffix} ~ *)")))
    })?;
    variants.add_compound("has", |inner, _| {
        let suffix = inner.selector.as_ref()?.strip_prefix('&')?.to_string();
        Some(Wrapper::selector(format!("&:has({suffix})")))
    })?;
    variants.add_compound("not", |inner, _| {
        let suffix = inner.selector.as_ref()?.strip_prefix('&')?.to_string();
        Some(Wrapper::selector(format!("&:not({suffix})")))
    })?;

    Ok(())
}

fn scope_class(base: &str, modifier: Option<&str>) -> String {
    match modifier {
        Some(name) => format!(".{}", escape(&format!("{base}/{name}"))),
        None => format!(".{base}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Theme, UtilityRegistry, VariantRegistry) {
        let mut theme = Theme::new();
        default_theme(&mut theme);
        let mut utilities = UtilityRegistry::new();
        let mut variants = VariantRegistry::new();
        register_defaults(&mut utilities, &mut variants, &theme).unwrap();
        (theme, utilities, variants)
    }

    #[test]
    fn core_tables_register_cleanly() {
        let (theme, utilities, variants) = setup();
        assert!(theme.contains("--spacing"));
        assert!(utilities.is_static("flex"));
        assert!(utilities.get_functional("bg").is_some());
        assert!(variants.is_static("hover"));
        assert!(variants.is_compound("group"));
    }

    #[test]
    fn breakpoints_follow_the_theme() {
        let (_, _, variants) = setup();
        assert_eq!(
            variants.get_static("sm"),
            Some(&[Wrapper::at_rule("@media (width >= 40rem)")][..])
        );
        assert_eq!(
            variants.get_static("max-lg"),
            Some(&[Wrapper::at_rule("@media (width < 64rem)")][..])
        );
    }

    #[test]
    fn named_group_scopes_with_escaped_class() {
        assert_eq!(scope_class("group", Some("sidebar")), ".group\\/sidebar");
        assert_eq!(scope_class("peer", None), ".peer");
    }
}
