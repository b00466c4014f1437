//! Parsed candidate data model.
//!
//! A [`Candidate`] is the structured form of one utility class token. It is
//! an immutable value object: created once per input token, consumed by the
//! matching engine, then discarded.

/// The value part of a functional utility or variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A named value resolved through the values table or the theme
    /// (`red-500` in `bg-red-500`).
    ThemeKey(String),
    /// A literal CSS value embedded via `[...]` or the `(--x)` shorthand,
    /// already decoded and whitespace-normalized.
    Arbitrary {
        value: String,
        /// Explicit type hint (`[length:var(--x)]`).
        type_hint: Option<String>,
    },
    /// A fraction like `1/2`, for utilities that resolve it to a percentage.
    Fraction { numerator: String, denominator: String },
    /// A bare keyword or number usable without theme lookup (`4` in `p-4`).
    Bare(String),
}

/// A `/suffix` modifier, used chiefly for opacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `/50` or a named theme modifier.
    Named(String),
    /// `/[0.5]` or `/(--my-opacity)`, decoded.
    Arbitrary(String),
}

/// The utility portion of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UtilityRef {
    /// A fixed-name utility (`flex`).
    Static(String),
    /// A registered name plus an optional value (`bg-red-500`, `order`).
    Functional { name: String, value: Option<Value> },
    /// `[property:value]`: a literal declaration.
    ArbitraryProperty { property: String, value: String },
}

/// One `name:` prefix in the variant chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    /// A fixed wrapper (`hover`, `dark`).
    Static(String),
    /// A registered name plus an optional value (`supports-grid`,
    /// `min-[800px]`).
    Functional { name: String, value: Option<Value> },
    /// `[...]`: a literal selector template (contains `&`) or at-rule
    /// (starts with `@`), decoded.
    Arbitrary(String),
    /// A scoping variant wrapping an inner variant (`group-hover`,
    /// `peer-checked/name`, `has-[.active]`).
    Compound {
        name: String,
        inner: Box<Variant>,
        modifier: Option<Modifier>,
    },
}

/// Parsed form of one input token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The original token, used verbatim (escaped) as the class selector.
    pub raw: String,
    /// Variant chain in source order; the first entry wraps outermost.
    pub variants: Vec<Variant>,
    /// Leading `-` on the utility.
    pub negative: bool,
    /// Trailing `!`.
    pub important: bool,
    /// The utility itself.
    pub root: UtilityRef,
    /// Optional `/modifier`.
    pub modifier: Option<Modifier>,
}
