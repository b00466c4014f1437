//! CSS value classification.
//!
//! Pure predicates that decide what *kind* of value a raw string is. The
//! matching engine uses these to type-check arbitrary values against a
//! utility's declared hint, and functional utilities use the numeric
//! validators to accept or reject bare values.

/// The value kinds the engine can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Color,
    Length,
    Percentage,
    Angle,
    Fraction,
    Number,
    Url,
    Image,
    FamilyName,
    GenericName,
    AbsoluteSize,
    RelativeSize,
    LineWidth,
    Vector,
    /// Accepts any well-formed value. Always matches.
    Any,
}

impl DataType {
    /// Parse a bracketed type hint like `[color:var(--x)]`.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "color" => Some(Self::Color),
            "length" => Some(Self::Length),
            "percentage" => Some(Self::Percentage),
            "angle" => Some(Self::Angle),
            "number" => Some(Self::Number),
            "url" => Some(Self::Url),
            "image" => Some(Self::Image),
            "family-name" => Some(Self::FamilyName),
            "generic-name" => Some(Self::GenericName),
            "absolute-size" => Some(Self::AbsoluteSize),
            "relative-size" => Some(Self::RelativeSize),
            "line-width" => Some(Self::LineWidth),
            _ => None,
        }
    }

    /// Whether `value` matches this kind.
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Color => is_color(value),
            Self::Length => is_length(value),
            Self::Percentage => is_percentage(value),
            Self::Angle => is_angle(value),
            Self::Fraction => is_fraction(value),
            Self::Number => is_number(value),
            Self::Url => is_url(value),
            Self::Image => is_image(value),
            Self::FamilyName => is_family_name(value),
            Self::GenericName => is_generic_name(value),
            Self::AbsoluteSize => is_absolute_size(value),
            Self::RelativeSize => is_relative_size(value),
            Self::LineWidth => is_line_width(value),
            Self::Vector => is_vector(value),
            Self::Any => true,
        }
    }
}

/// Infer the type of `value` from an ordered list of candidates.
///
/// The order of `candidates` is the tie-break when a value could match more
/// than one kind. Returns `None` when the value references `var(` (ambiguous
/// until runtime) or matches nothing.
pub fn infer_data_type(value: &str, candidates: &[DataType]) -> Option<DataType> {
    if value.contains("var(") {
        return None;
    }

    candidates.iter().copied().find(|t| t.matches(value))
}

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

const SYSTEM_COLORS: &[&str] = &[
    "accentcolor", "accentcolortext", "activetext", "buttonborder", "buttonface", "buttontext",
    "canvas", "canvastext", "field", "fieldtext", "graytext", "highlight", "highlighttext",
    "linktext", "mark", "marktext", "selecteditem", "selecteditemtext", "visitedtext",
];

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color", "color-mix",
    "light-dark",
];

/// Whether `value` is a CSS color.
///
/// Covers hex notation, named and system colors, the `currentcolor` /
/// `transparent` / `inherit` keywords, and the CSS color functions.
pub fn is_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }

    let lower = value.to_ascii_lowercase();
    if lower == "currentcolor" || lower == "transparent" || lower == "inherit" {
        return true;
    }
    if NAMED_COLORS.contains(&lower.as_str()) || SYSTEM_COLORS.contains(&lower.as_str()) {
        return true;
    }

    if let Some(open) = lower.find('(') {
        return lower.ends_with(')') && COLOR_FUNCTIONS.contains(&&lower[..open]);
    }

    false
}

const LENGTH_UNITS: &[&str] = &[
    "cm", "mm", "q", "in", "pc", "pt", "px", "em", "ex", "ch", "rem", "lh", "rlh", "vw", "vh",
    "vmin", "vmax", "vb", "vi", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw", "cqh", "cqi",
    "cqb", "cqmin", "cqmax", "cap", "ic",
];

/// Whether `value` is a number followed by a length unit.
///
/// Unitless numbers are *not* lengths.
pub fn is_length(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    LENGTH_UNITS
        .iter()
        .any(|unit| lower.strip_suffix(unit).is_some_and(is_number))
}

const ANGLE_UNITS: &[&str] = &["deg", "grad", "rad", "turn"];

/// Whether `value` is a number followed by an angle unit.
pub fn is_angle(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    ANGLE_UNITS
        .iter()
        .any(|unit| lower.strip_suffix(unit).is_some_and(is_number))
}

/// Whether `value` is a percentage (`50%`, `-3.5%`).
pub fn is_percentage(value: &str) -> bool {
    value.strip_suffix('%').is_some_and(is_number)
}

/// Whether `value` is a fraction (`1/2` or `1 / 2`).
pub fn is_fraction(value: &str) -> bool {
    let mut parts = value.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(num), Some(den)) => is_number(num.trim_end()) && is_number(den.trim_start()),
        _ => false,
    }
}

/// Whether `value` is a CSS number: optional sign, integer or decimal,
/// optional scientific exponent.
pub fn is_number(value: &str) -> bool {
    let mut bytes = value.as_bytes();
    if let [b'+' | b'-', rest @ ..] = bytes {
        bytes = rest;
    }

    let digits_before = count_digits(&mut bytes);
    let has_dot = if let [b'.', rest @ ..] = bytes {
        bytes = rest;
        true
    } else {
        false
    };
    let digits_after = count_digits(&mut bytes);

    if digits_before == 0 && digits_after == 0 {
        return false;
    }
    if has_dot && digits_after == 0 {
        return false;
    }

    if let [b'e' | b'E', rest @ ..] = bytes {
        bytes = rest;
        if let [b'+' | b'-', rest @ ..] = bytes {
            bytes = rest;
        }
        if count_digits(&mut bytes) == 0 {
            return false;
        }
    }

    bytes.is_empty()
}

fn count_digits(bytes: &mut &[u8]) -> usize {
    let n = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    *bytes = &bytes[n..];
    n
}

/// Whether `value` is a non-negative integer without leading zeros.
pub fn is_positive_integer(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'))
}

/// Whether `value` is an integer greater than zero.
pub fn is_strict_positive_integer(value: &str) -> bool {
    is_positive_integer(value) && value != "0"
}

/// Whether `value` is `0` or a multiple of `0.25`.
pub fn is_valid_spacing_multiplier(value: &str) -> bool {
    is_multiple_of(value, 0.25)
}

/// Whether `value` is an integer in `0..=100`.
pub fn is_valid_opacity_value(value: &str) -> bool {
    is_positive_integer(value) && value.parse::<u32>().is_ok_and(|n| n <= 100)
}

/// Whether `value` parses as a number that is a multiple of `step`.
pub fn is_multiple_of(value: &str, step: f64) -> bool {
    if !is_number(value) {
        return false;
    }
    value
        .parse::<f64>()
        .is_ok_and(|n| (n / step).fract() == 0.0)
}

/// Whether `value` is a `url(...)` call.
pub fn is_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("url(") && lower.ends_with(')')
}

const GRADIENT_FUNCTIONS: &[&str] = &[
    "linear-gradient",
    "radial-gradient",
    "conic-gradient",
    "repeating-linear-gradient",
    "repeating-radial-gradient",
    "repeating-conic-gradient",
];

/// Whether `value` is an image: a url or a gradient function call.
pub fn is_image(value: &str) -> bool {
    if is_url(value) {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    if let Some(open) = lower.find('(') {
        return lower.ends_with(')') && GRADIENT_FUNCTIONS.contains(&&lower[..open]);
    }
    false
}

/// Whether `value` is exactly three space-separated numbers.
pub fn is_vector(value: &str) -> bool {
    let parts: Vec<&str> = value.split_ascii_whitespace().collect();
    parts.len() == 3 && parts.iter().all(|p| is_number(p))
}

const GENERIC_FAMILIES: &[&str] = &[
    "serif", "sans-serif", "monospace", "cursive", "fantasy", "system-ui", "ui-serif",
    "ui-sans-serif", "ui-monospace", "ui-rounded", "math", "emoji", "fangsong",
];

/// Whether `value` is a generic font family keyword.
pub fn is_generic_name(value: &str) -> bool {
    GENERIC_FAMILIES.contains(&value)
}

/// Whether `value` follows the font-family grammar: a comma-separated list
/// of quoted names or bare names whose words do not start with a digit.
pub fn is_family_name(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    for family in crate::segment::segment(value, ',') {
        let family = family.trim();
        if family.is_empty() {
            return false;
        }
        if family.starts_with('"') || family.starts_with('\'') {
            continue;
        }
        for word in family.split_ascii_whitespace() {
            if word.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
                return false;
            }
        }
    }

    true
}

/// Whether `value` is a CSS absolute-size keyword.
pub fn is_absolute_size(value: &str) -> bool {
    matches!(
        value,
        "xx-small" | "x-small" | "small" | "medium" | "large" | "x-large" | "xx-large"
            | "xxx-large"
    )
}

/// Whether `value` is a CSS relative-size keyword.
pub fn is_relative_size(value: &str) -> bool {
    matches!(value, "larger" | "smaller")
}

/// Whether `value` is a line width: `thin`/`medium`/`thick` or a length.
pub fn is_line_width(value: &str) -> bool {
    matches!(value, "thin" | "medium" | "thick") || is_length(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert!(is_color("#abc"));
        assert!(is_color("#aabbcc"));
        assert!(is_color("#aabbccdd"));
        assert!(!is_color("#ab"));
        assert!(!is_color("#ggg"));
        assert!(is_color("red"));
        assert!(is_color("rebeccapurple"));
        assert!(is_color("CanvasText"));
        assert!(is_color("currentColor"));
        assert!(is_color("transparent"));
        assert!(is_color("rgb(1 2 3)"));
        assert!(is_color("oklch(0.7 0.1 200)"));
        assert!(is_color("color-mix(in oklab, red 50%, transparent)"));
        assert!(is_color("light-dark(white, black)"));
        assert!(!is_color("url(red.png)"));
        assert!(!is_color("10px"));
    }

    #[test]
    fn lengths_and_angles() {
        assert!(is_length("10px"));
        assert!(is_length("-1.5rem"));
        assert!(is_length("10svh"));
        assert!(!is_length("10"));
        assert!(!is_length("px"));
        assert!(is_angle("45deg"));
        assert!(is_angle("0.5turn"));
        assert!(!is_angle("45"));
    }

    #[test]
    fn numbers() {
        assert!(is_number("1"));
        assert!(is_number("-1.5"));
        assert!(is_number("+2"));
        assert!(is_number(".5"));
        assert!(is_number("1e5"));
        assert!(is_number("1e+5"));
        assert!(is_number("1.2E-3"));
        assert!(!is_number(""));
        assert!(!is_number("1."));
        assert!(!is_number("1e"));
        assert!(!is_number("abc"));
        assert!(!is_number("1px"));
    }

    #[test]
    fn fractions_and_percentages() {
        assert!(is_fraction("1/2"));
        assert!(is_fraction("1 / 2"));
        assert!(!is_fraction("1/"));
        assert!(!is_fraction("a/b"));
        assert!(is_percentage("50%"));
        assert!(is_percentage("-3.5%"));
        assert!(!is_percentage("%"));
    }

    #[test]
    fn integers_and_multiples() {
        assert!(is_positive_integer("0"));
        assert!(is_positive_integer("42"));
        assert!(!is_positive_integer("042"));
        assert!(!is_positive_integer("-1"));
        assert!(is_strict_positive_integer("1"));
        assert!(!is_strict_positive_integer("0"));
        assert!(is_valid_spacing_multiplier("0"));
        assert!(is_valid_spacing_multiplier("1.25"));
        assert!(is_valid_spacing_multiplier("3.5"));
        assert!(!is_valid_spacing_multiplier("1.3"));
        assert!(is_valid_opacity_value("0"));
        assert!(is_valid_opacity_value("100"));
        assert!(!is_valid_opacity_value("101"));
        assert!(!is_valid_opacity_value("50.5"));
    }

    #[test]
    fn urls_and_images() {
        assert!(is_url("url(image.png)"));
        assert!(is_url("url('image.png')"));
        assert!(!is_url("image.png"));
        assert!(is_image("url(image.png)"));
        assert!(is_image("linear-gradient(to right, red, blue)"));
        assert!(is_image("repeating-conic-gradient(red, blue)"));
        assert!(!is_image("var(--image)"));
    }

    #[test]
    fn vectors() {
        assert!(is_vector("1 2 3"));
        assert!(is_vector("1.5 -2 0"));
        assert!(!is_vector("1 2"));
        assert!(!is_vector("1 2 3 4"));
        assert!(!is_vector("1 a 3"));
    }

    #[test]
    fn font_families() {
        assert!(is_generic_name("sans-serif"));
        assert!(!is_generic_name("Arial"));
        assert!(is_family_name("Arial"));
        assert!(is_family_name("'Exo 2', sans-serif"));
        assert!(is_family_name("Helvetica Neue, Arial"));
        assert!(!is_family_name("2001 Odyssey"));
        assert!(!is_family_name(""));
    }

    #[test]
    fn sizes_and_line_widths() {
        assert!(is_absolute_size("xx-large"));
        assert!(is_relative_size("larger"));
        assert!(is_line_width("thin"));
        assert!(is_line_width("2px"));
        assert!(!is_line_width("2"));
    }

    #[test]
    fn inference_uses_candidate_order() {
        assert_eq!(
            infer_data_type("10px", &[DataType::Color, DataType::Length]),
            Some(DataType::Length)
        );
        assert_eq!(
            infer_data_type("#fff", &[DataType::Color, DataType::Length]),
            Some(DataType::Color)
        );
        // A bare number is a number, not a percentage.
        assert_eq!(
            infer_data_type("10", &[DataType::Percentage, DataType::Number]),
            Some(DataType::Number)
        );
        // var() is ambiguous until runtime.
        assert_eq!(infer_data_type("var(--x)", &[DataType::Color]), None);
        assert_eq!(infer_data_type("bogus", &[DataType::Color]), None);
    }
}
