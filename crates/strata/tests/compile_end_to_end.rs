//! End-to-end compilation tests: class lists in, stylesheets out.

use strata::prelude::*;

fn compiler() -> Compiler {
    compile("", Options::default()).expect("default compiler")
}

#[test]
fn static_utility_round_trip() {
    let css = compiler().build(&["order-first"]);
    assert_eq!(css, ".order-first {\n  order: var(--order-first);\n}\n");
}

#[test]
fn negative_value_compiles_to_calc() {
    let css = compiler().build(&["-order-4"]);
    assert_eq!(css, ".-order-4 {\n  order: calc(4 * -1);\n}\n");
}

#[test]
fn unknown_classes_yield_empty_output() {
    let css = compiler().build(&["no-such-utility", "bogus:flex", "w-", "w-1/2/3"]);
    assert_eq!(css, "");
}

#[test]
fn output_is_sorted_and_deduplicated() {
    let compiler = compiler();
    let css = compiler.build(&["p-10", "flex", "p-2", "flex", "p-10"]);
    let flex = css.find(".flex").unwrap();
    let p2 = css.find(".p-2").unwrap();
    let p10 = css.find(".p-10 ").unwrap();
    assert!(flex < p2 && p2 < p10);
    assert_eq!(css.matches(".flex {").count(), 1);
}

#[test]
fn theme_token_with_opacity_modifier() {
    let css = compiler().build(&["hover:bg-red-500/50"]);
    assert_eq!(
        css,
        ".hover\\:bg-red-500\\/50:hover {\n  background-color: color-mix(in oklab, var(--color-red-500) 50%, transparent);\n}\n"
    );
}

#[test]
fn variant_chain_nests_outermost_first() {
    let css = compiler().build(&["sm:dark:flex"]);
    assert_eq!(
        css,
        "@media (width >= 40rem) {\n  @media (prefers-color-scheme: dark) {\n    .sm\\:dark\\:flex {\n      display: flex;\n    }\n  }\n}\n"
    );
}

#[test]
fn important_flag_lands_on_every_declaration() {
    let css = compiler().build(&["truncate!"]);
    assert!(css.contains("overflow: hidden !important;"));
    assert!(css.contains("text-overflow: ellipsis !important;"));
    assert!(css.contains("white-space: nowrap !important;"));
}

#[test]
fn custom_property_rules_are_synthesized_when_referenced() {
    let compiler = compiler();
    let css = compiler.build(&["border-dashed"]);
    assert!(css.starts_with(
        "@property --tw-border-style {\n  syntax: \"*\";\n  inherits: false;\n  initial-value: solid;\n}\n"
    ));
    assert!(css.contains(".border-dashed {\n  --tw-border-style: dashed;\n  border-style: dashed;\n}\n"));

    // Rules that never touch the property do not pull the @property in.
    assert!(!compiler.build(&["flex"]).contains("@property"));
}

#[test]
fn theme_source_feeds_matching() {
    let compiler = compile(
        "@theme { --color-mint-500: oklch(0.72 0.11 178); }",
        Options::default(),
    )
    .unwrap();
    let css = compiler.build(&["bg-mint-500"]);
    assert_eq!(
        css,
        ".bg-mint-500 {\n  background-color: var(--color-mint-500);\n}\n"
    );
}

#[test]
fn arbitrary_values_and_properties() {
    let compiler = compiler();
    assert_eq!(
        compiler.build(&["w-[32px]"]),
        ".w-\\[32px\\] {\n  width: 32px;\n}\n"
    );
    assert_eq!(
        compiler.build(&["[clip-path:circle(40%)]"]),
        ".\\[clip-path\\:circle\\(40\\%\\)\\] {\n  clip-path: circle(40%);\n}\n"
    );
}

#[test]
fn fractions_compile_to_percentage_calcs() {
    let css = compiler().build(&["w-1/2"]);
    assert_eq!(css, ".w-1\\/2 {\n  width: calc(1 / 2 * 100%);\n}\n");
}

#[test]
fn prefix_gates_candidate_parsing() {
    let compiler = compile(
        "",
        Options {
            prefix: Some("tw".to_string()),
            ..Options::default()
        },
    )
    .unwrap();

    assert_eq!(
        compiler.build(&["tw-flex"]),
        ".tw-flex {\n  display: flex;\n}\n"
    );
    assert_eq!(compiler.build(&["flex"]), "");
}

#[test]
fn builds_are_idempotent_across_compilers() {
    let classes = [
        "flex",
        "hover:bg-red-500/50",
        "sm:p-4",
        "-mt-2",
        "w-1/2",
        "group-hover:underline",
    ];
    let first = compiler().build(&classes);
    let second = compiler().build(&classes);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn compound_variants_scope_through_group_and_peer() {
    let compiler = compiler();
    assert_eq!(
        compiler.build(&["group-hover:flex"]),
        ".group-hover\\:flex:is(:where(.group):hover *) {\n  display: flex;\n}\n"
    );
    assert_eq!(
        compiler.build(&["peer-checked/agree:underline"]),
        ".peer-checked\\/agree\\:underline:is(:where(.peer\\/agree):checked ~ *) {\n  text-decoration-line: underline;\n}\n"
    );
}

#[test]
fn arbitrary_selectors_compound_through_has() {
    let compiler = compiler();
    assert_eq!(
        compiler.build(&["has-[.active]:flex"]),
        ".has-\\[\\.active\\]\\:flex:has(.active) {\n  display: flex;\n}\n"
    );
    // Outside a compound, a bare selector has nothing to attach to.
    assert_eq!(compiler.build(&["[.active]:flex"]), "");
}

#[test]
fn meaningless_suffixes_match_nothing() {
    let compiler = compiler();
    assert_eq!(compiler.build(&["p-4/50"]), "");
    assert_eq!(compiler.build(&["-m-auto"]), "");
}

#[test]
fn plugins_extend_theme_and_registries() {
    struct TabsPlugin;

    impl Plugin for TabsPlugin {
        fn name(&self) -> &str {
            "tabs"
        }

        fn theme_extensions(&self, _options: &PluginOptions) -> Vec<(String, String)> {
            vec![("--tab-size-github".to_string(), "8".to_string())]
        }

        fn apply(&self, api: &mut PluginApi<'_>, _options: &PluginOptions) -> Result<()> {
            api.match_utilities(
                "tab",
                FunctionalUtility::for_properties(&["tab-size"])
                    .types(&[DataType::Number])
                    .namespace("--tab-size"),
            )?;
            api.add_variant("hocus", Wrapper::selector("&:is(:hover, :focus)"))?;
            Ok(())
        }
    }

    let compiler = compile("", Options::default())
        .unwrap()
        .with_plugins(&[PluginEntry::new(Box::new(TabsPlugin))])
        .unwrap();

    assert_eq!(
        compiler.build(&["tab-github"]),
        ".tab-github {\n  tab-size: var(--tab-size-github);\n}\n"
    );
    assert_eq!(
        compiler.build(&["tab-4"]),
        ".tab-4 {\n  tab-size: 4;\n}\n"
    );
    assert_eq!(
        compiler.build(&["hocus:flex"]),
        ".hocus\\:flex:is(:hover, :focus) {\n  display: flex;\n}\n"
    );
}

#[test]
fn base_and_components_precede_utilities() {
    struct ResetPlugin;

    impl Plugin for ResetPlugin {
        fn name(&self) -> &str {
            "reset"
        }

        fn apply(&self, api: &mut PluginApi<'_>, _options: &PluginOptions) -> Result<()> {
            api.add_base(vec![CssNode::nested(
                "body",
                vec![CssNode::decl("margin", "0")],
            )]);
            api.add_components(
                ".btn",
                vec![
                    CssNode::decl("display", "inline-flex"),
                    CssNode::decl("padding", api.theme("--spacing", "0.25rem")),
                ],
            );
            Ok(())
        }
    }

    let compiler = compile("", Options::default())
        .unwrap()
        .with_plugins(&[PluginEntry::new(Box::new(ResetPlugin))])
        .unwrap();

    let css = compiler.build(&["flex"]);
    let body = css.find("body {").unwrap();
    let btn = css.find(".btn {").unwrap();
    let flex = css.find(".flex {").unwrap();
    assert!(body < btn && btn < flex);
    assert!(css.contains("padding: 0.25rem;"));
}

#[test]
fn stats_reflect_matching_outcomes() {
    let compiler = compiler();
    let (css, stats) = compiler.build_with_stats(&["flex", "nope", "flex", "p-2"]);
    assert_eq!(stats.candidates, 4);
    assert_eq!(stats.matched, 3);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.rules, 2);
    assert!(!css.is_empty());
}
