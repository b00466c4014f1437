//! Arbitrary value validation and decoding.
//!
//! An arbitrary value is the literal CSS embedded in a class name via
//! `[...]` (e.g. `bg-[#0088cc]`, `[color:red]`). Class names cannot contain
//! whitespace, so underscores stand in for spaces and need decoding before
//! the value reaches a stylesheet.

/// Whether the interior of an arbitrary value is syntactically acceptable.
///
/// The scan keeps independent counters for parentheses and square brackets.
/// An unmatched *close* fails immediately; unmatched *opens* are tolerated.
/// That asymmetry is deliberate compatibility with the reference behavior,
/// which the ordering/escaping test corpus depends on.
///
/// A bare `;` or any `{`/`}` at the top level also fails: those would let a
/// value break out of its declaration. The empty string is valid.
pub fn is_valid_arbitrary(value: &str) -> bool {
    let mut parens = 0usize;
    let mut brackets = 0usize;
    let mut quote: Option<char> = None;

    let mut iter = value.chars();
    while let Some(ch) = iter.next() {
        if ch == '\\' {
            iter.next();
            continue;
        }

        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '(' => parens += 1,
            ')' => {
                if parens == 0 {
                    return false;
                }
                parens -= 1;
            }
            '[' => brackets += 1,
            ']' => {
                if brackets == 0 {
                    return false;
                }
                brackets -= 1;
            }
            '{' | '}' if parens == 0 && brackets == 0 => return false,
            ';' if parens == 0 && brackets == 0 => return false,
            _ => {}
        }
    }

    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Inside `url(...)`: nothing is decoded.
    Url,
    /// Inside the first argument of `var(...)` or `theme(...)`: underscores
    /// are part of the custom property / path name.
    FirstArg,
    /// Any other call: decode normally.
    Plain,
}

/// Decode the underscore-as-space encoding of an arbitrary value.
///
/// `_` becomes a space except when escaped (`\_` decodes to a literal `_`),
/// inside a `url(...)` call, or inside the first argument of `var(`/`theme(`.
/// Later arguments of `var(`/`theme(` (fallback values) are decoded.
///
/// # Examples
///
/// ```
/// use strata::value::decode_arbitrary_value;
///
/// assert_eq!(decode_arbitrary_value("hello_world"), "hello world");
/// assert_eq!(decode_arbitrary_value("hello\\_world"), "hello_world");
/// assert_eq!(decode_arbitrary_value("var(--my_var,fallback_value)"), "var(--my_var,fallback value)");
/// assert_eq!(decode_arbitrary_value("url(some_image.png)"), "url(some_image.png)");
/// ```
pub fn decode_arbitrary_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut stack: Vec<Frame> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\\' if chars.get(i + 1) == Some(&'_') => {
                out.push('_');
                i += 2;
                continue;
            }
            '(' => {
                let name = ident_before(&chars, i);
                let frame = if name.eq_ignore_ascii_case("url") {
                    Frame::Url
                } else if name == "var" || name == "theme" {
                    Frame::FirstArg
                } else {
                    Frame::Plain
                };
                stack.push(frame);
                out.push(ch);
            }
            ')' => {
                stack.pop();
                out.push(ch);
            }
            ',' => {
                // The first comma at a var()/theme() level ends the
                // protected first argument.
                if let Some(frame @ Frame::FirstArg) = stack.last_mut() {
                    *frame = Frame::Plain;
                }
                out.push(ch);
            }
            '_' => {
                let protected = stack
                    .iter()
                    .any(|f| matches!(f, Frame::Url | Frame::FirstArg));
                out.push(if protected { '_' } else { ' ' });
            }
            _ => out.push(ch),
        }
        i += 1;
    }

    out
}

/// The identifier ending just before position `open` (an opening paren).
fn ident_before(chars: &[char], open: usize) -> String {
    let mut start = open;
    while start > 0 {
        let ch = chars[start - 1];
        if ch.is_ascii_alphanumeric() || ch == '-' {
            start -= 1;
        } else {
            break;
        }
    }
    chars[start..open].iter().collect()
}
