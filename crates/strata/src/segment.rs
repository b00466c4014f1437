//! Separator-aware string segmentation.
//!
//! Splitting a class name like `md:[&>a]:-mt-4` on `:` must not split inside
//! the `[...]` part. This module is the foundational scanning primitive the
//! candidate parser and value pipeline build on.

/// Split `input` on `separator`, respecting nested `()`, `[]`, `{}` and
/// quoted substrings.
///
/// The separator only splits at bracket depth zero, outside quotes. A
/// backslash escapes the following character, except that the separator
/// itself always splits, even when it equals the escape character.
///
/// Unbalanced quotes do not error: everything after a stray quote is treated
/// as quoted to the end of input. Unbalanced brackets are not rejected here
/// either; bracket balance is validated by the arbitrary-value pipeline.
///
/// # Examples
///
/// ```
/// use strata::segment::segment;
///
/// assert_eq!(segment("a:(b:c):d", ':'), vec!["a", "(b:c)", "d"]);
/// assert_eq!(segment("bg-red-500/50", '/'), vec!["bg-red-500", "50"]);
/// ```
pub fn segment(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    let mut iter = input.char_indices();
    while let Some((idx, ch)) = iter.next() {
        if quote.is_none() && depth == 0 && ch == separator {
            parts.push(&input[start..idx]);
            start = idx + ch.len_utf8();
            continue;
        }

        if ch == '\\' {
            // Consume the escaped character as a literal.
            iter.next();
            continue;
        }

        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' | '`' => quote = Some(ch),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    parts.push(&input[start..]);
    parts
}

/// Position of the last `separator` at depth zero, if any.
///
/// Used to split a utility root from its `/modifier` suffix without slicing
/// inside arbitrary values.
pub fn last_index_of(input: &str, separator: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut found = None;

    let mut iter = input.char_indices();
    while let Some((idx, ch)) = iter.next() {
        if quote.is_none() && depth == 0 && ch == separator {
            found = Some(idx);
            continue;
        }

        if ch == '\\' {
            iter.next();
            continue;
        }

        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' | '`' => quote = Some(ch),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_top_level_only() {
        assert_eq!(segment("a:(b:c):d", ':'), vec!["a", "(b:c)", "d"]);
        assert_eq!(segment("a:[b:c]:d", ':'), vec!["a", "[b:c]", "d"]);
        assert_eq!(segment("a:{b:c}:d", ':'), vec!["a", "{b:c}", "d"]);
    }

    #[test]
    fn respects_quotes() {
        assert_eq!(segment("a:'b:c':d", ':'), vec!["a", "'b:c'", "d"]);
        assert_eq!(segment("a:\"b:c\":d", ':'), vec!["a", "\"b:c\"", "d"]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest() {
        assert_eq!(segment("a:\"b:c:d", ':'), vec!["a", "\"b:c:d"]);
    }

    #[test]
    fn backslash_escapes_separator() {
        assert_eq!(segment("a\\:b:c", ':'), vec!["a\\:b", "c"]);
    }

    #[test]
    fn separator_equal_to_escape_still_splits() {
        assert_eq!(segment("a\\b\\c\\d", '\\'), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_and_trailing_segments() {
        assert_eq!(segment("", ':'), vec![""]);
        assert_eq!(segment("a:", ':'), vec!["a", ""]);
        assert_eq!(segment(":a", ':'), vec!["", "a"]);
    }

    #[test]
    fn unbalanced_brackets_are_tolerated() {
        assert_eq!(segment("a)b:c", ':'), vec!["a)b", "c"]);
        assert_eq!(segment("a(b:c", ':'), vec!["a(b:c"]);
    }

    #[test]
    fn last_index_skips_nested() {
        assert_eq!(last_index_of("bg-red-500/50", '/'), Some(10));
        assert_eq!(last_index_of("bg-[url(a/b)]", '/'), None);
        assert_eq!(last_index_of("w-1/2/3", '/'), Some(5));
    }
}
