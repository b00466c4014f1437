//! Text output: compiled rules and plugin CSS trees become a stylesheet.
//!
//! Two-space indentation, one declaration per line, at-rules nested
//! outermost-first. The writer is infallible; everything lands in a String.

use crate::css::CssNode;
use crate::registry::CustomProperty;

use super::rule::CompiledRule;

const INDENT: &str = "  ";

/// Append one compiled rule, wrapped in its at-rules.
pub fn write_rule(out: &mut String, rule: &CompiledRule) {
    for (depth, at_rule) in rule.at_rules.iter().enumerate() {
        push_indent(out, depth);
        out.push_str(at_rule);
        out.push_str(" {\n");
    }

    let depth = rule.at_rules.len();
    push_indent(out, depth);
    out.push_str(&rule.selector);
    out.push_str(" {\n");
    for decl in &rule.declarations {
        push_indent(out, depth + 1);
        out.push_str(&decl.to_string());
        out.push('\n');
    }
    push_indent(out, depth);
    out.push_str("}\n");

    for depth in (0..rule.at_rules.len()).rev() {
        push_indent(out, depth);
        out.push_str("}\n");
    }
}

/// Append a plugin-authored CSS node at the top level.
pub fn write_node(out: &mut String, node: &CssNode) {
    write_node_at(out, node, 0);
}

fn write_node_at(out: &mut String, node: &CssNode, depth: usize) {
    match node {
        CssNode::Decl(decl) => {
            push_indent(out, depth);
            out.push_str(&decl.to_string());
            out.push('\n');
        }
        CssNode::Nested { selector, nodes } => {
            push_indent(out, depth);
            out.push_str(selector);
            out.push_str(" {\n");
            for node in nodes {
                write_node_at(out, node, depth + 1);
            }
            push_indent(out, depth);
            out.push_str("}\n");
        }
    }
}

/// Append an `@property` rule for an engine-owned custom property.
pub fn write_property(out: &mut String, name: &str, property: &CustomProperty) {
    out.push_str("@property ");
    out.push_str(name);
    out.push_str(" {\n");
    push_indent(out, 1);
    out.push_str("syntax: ");
    out.push_str(&property.syntax);
    out.push_str(";\n");
    push_indent(out, 1);
    out.push_str("inherits: ");
    out.push_str(if property.inherits { "true" } else { "false" });
    out.push_str(";\n");
    if let Some(initial) = &property.initial_value {
        push_indent(out, 1);
        out.push_str("initial-value: ");
        out.push_str(initial);
        out.push_str(";\n");
    }
    out.push_str("}\n");
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
