//! CSS identifier escaping for class selectors.

use std::fmt::Write;

/// Escape a raw class name into a valid CSS identifier, suitable for use
/// after `.` in a selector.
///
/// Follows CSS.escape semantics: NUL becomes U+FFFD, a leading digit is
/// hex-escaped, and characters outside the identifier set get a backslash.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    // serialize_identifier only fails when the sink does, and String never does.
    let _ = cssparser::serialize_identifier(input, &mut out);
    out
}

/// Invert [`escape`]: resolve backslash escapes back to the raw name.
///
/// Handles both hex escapes (`\31 23` for "123", up to six digits, optional
/// trailing whitespace consumed) and single-character escapes (`\[`).
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('\\');
            break;
        };
        if next.is_ascii_hexdigit() {
            let mut code = 0u32;
            let mut digits = 0;
            while digits < 6 {
                match chars.peek() {
                    Some(c) if c.is_ascii_hexdigit() => {
                        code = code * 16 + c.to_digit(16).unwrap_or(0);
                        chars.next();
                        digits += 1;
                    }
                    _ => break,
                }
            }
            // A single whitespace terminates the escape and is consumed.
            if matches!(chars.peek(), Some(' ' | '\t' | '\n')) {
                chars.next();
            }
            out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        } else {
            out.push(next);
            chars.next();
        }
    }

    out
}
