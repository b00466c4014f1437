//! Math-operator whitespace normalization.
//!
//! Inside class names, `calc(100%-10px)` has no spaces (they are not valid
//! there), but CSS requires `calc(100% - 10px)`. This module re-inserts the
//! whitespace, but only inside recognized math function calls so values like
//! `url(...)` or `var(...)` pass through untouched.

const MATH_FUNCTIONS: &[&str] = &[
    "calc",
    "min",
    "max",
    "clamp",
    "mod",
    "rem",
    "round",
    "sin",
    "cos",
    "tan",
    "asin",
    "acos",
    "atan",
    "atan2",
    "pow",
    "sqrt",
    "hypot",
    "log",
    "exp",
    "abs",
    "sign",
    "env",
    "anchor-size",
];

/// Cheap pre-check: true only when a known math-function name is immediately
/// followed by `(`.
pub fn has_math_fn(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '(' {
            let name = ident_before(&chars, i);
            if MATH_FUNCTIONS.contains(&name.as_str()) {
                return true;
            }
        }
    }
    false
}

/// Insert single spaces around binary `+ - * /` inside math function calls.
///
/// Leading unary signs stay attached (`-10px`), scientific notation is left
/// alone (`1e+5`), nested math-capable calls re-enter math mode, and commas
/// are normalized to `, ` at the same nesting level. Anything outside a math
/// function is returned byte-for-byte.
///
/// # Examples
///
/// ```
/// use strata::value::add_whitespace_around_math_operators;
///
/// assert_eq!(
///     add_whitespace_around_math_operators("calc(100%-10px)"),
///     "calc(100% - 10px)"
/// );
/// assert_eq!(
///     add_whitespace_around_math_operators("url(image.png)"),
///     "url(image.png)"
/// );
/// ```
pub fn add_whitespace_around_math_operators(value: &str) -> String {
    if !has_math_fn(value) {
        return value.to_string();
    }

    let chars: Vec<char> = value.chars().collect();
    let mut result = String::with_capacity(value.len() + 8);
    // One entry per open paren: whether its contents are formattable.
    let mut formattable: Vec<bool> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        match ch {
            '(' => {
                result.push(ch);
                let name = ident_before(&chars, i);
                if MATH_FUNCTIONS.contains(&name.as_str()) {
                    formattable.push(true);
                } else if name.is_empty() && formattable.last() == Some(&true) {
                    // Plain grouping parens inside a math function keep
                    // formatting active.
                    formattable.push(true);
                } else {
                    formattable.push(false);
                }
            }

            ')' => {
                result.push(ch);
                formattable.pop();
            }

            ',' if formattable.last() == Some(&true) => {
                result.push_str(", ");
            }

            ' ' if formattable.last() == Some(&true) && result.ends_with(' ') => {
                // Collapse runs of whitespace we may have introduced.
            }

            '+' | '-' | '*' | '/' if formattable.last() == Some(&true) => {
                let trimmed = result.trim_end();
                let prev = trimmed.chars().next_back();
                let prev_prev = {
                    let mut it = trimmed.chars().rev();
                    it.next();
                    it.next()
                };

                if ch == '-'
                    && i > 0
                    && chars[i - 1].is_ascii_alphabetic()
                    && chars.get(i + 1).is_some_and(|c| c.is_ascii_alphabetic())
                {
                    // Hyphen inside an identifier such as `fit-content` or
                    // `anchor-size`, not a subtraction.
                    result.push(ch);
                } else if matches!(prev, Some('e' | 'E'))
                    && prev_prev.is_some_and(|c| c.is_ascii_digit())
                {
                    // Scientific notation: `-3.4e-2` stays intact.
                    result.push(ch);
                } else if matches!(prev, Some('+' | '-' | '*' | '/')) {
                    // Preceded by another operator: this one is a sign.
                    result.push(ch);
                } else if matches!(prev, Some('(' | ',')) | prev.is_none() {
                    // At the start of an argument: unary sign.
                    result.push(ch);
                } else if chars.get(i - 1) == Some(&' ') {
                    // Space already present before, only add one after.
                    result.push(ch);
                    result.push(' ');
                } else {
                    result.push(' ');
                    result.push(ch);
                    result.push(' ');
                }
            }

            _ => result.push(ch),
        }

        i += 1;
    }

    result
}

fn ident_before(chars: &[char], open: usize) -> String {
    let mut start = open;
    while start > 0 {
        let ch = chars[start - 1];
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            start -= 1;
        } else {
            break;
        }
    }
    chars[start..open].iter().collect()
}
