//! # Type-Text Normalization
//!
//! Canonicalizes a parameter or return type so that the schema side and
//! the binding side compare equal when they describe the same type.
//!
//! Rules, applied in order:
//!
//! 1. `&in` (read-only reference) markers are removed.
//! 2. Any remaining `&`, `&out` or `&inout` reference marker is removed.
//! 3. The `const` qualifier is removed wherever it appears as a word.
//! 4. Runs of whitespace collapse to one space and the result is trimmed.
//!
//! Reference markers are replaced by a space rather than deleted outright
//! so that `a & b` never fuses into `ab`; step 4 cleans the gaps up.

use once_cell::sync::Lazy;
use regex::Regex;

static INPUT_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*&\s*in\b").expect("static regex"));

static REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*&\s*(?:inout\b|out\b)?").expect("static regex"));

static CONST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bconst\s+").expect("static regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalize a type string for equality comparison.
///
/// Total over any input and idempotent: `normalize_type(&normalize_type(s))`
/// equals `normalize_type(s)`.
///
/// ```
/// use bindsync_core::normalize_type;
///
/// assert_eq!(normalize_type("const Vec2 &in"), "Vec2");
/// assert_eq!(normalize_type("  array<float>  &  "), "array<float>");
/// ```
pub fn normalize_type(text: &str) -> String {
    let text = INPUT_REF_RE.replace_all(text, " ");
    let text = REF_RE.replace_all(&text, " ");
    let text = CONST_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_const() {
        assert_eq!(normalize_type("const string"), "string");
    }

    #[test]
    fn strips_input_reference_marker() {
        assert_eq!(normalize_type("const string &in"), "string");
        assert_eq!(normalize_type("Color&in"), "Color");
    }

    #[test]
    fn collapses_other_reference_markers() {
        assert_eq!(normalize_type("Mesh &"), "Mesh");
        assert_eq!(normalize_type("float &out"), "float");
        assert_eq!(normalize_type("Path &inout"), "Path");
    }

    #[test]
    fn inout_is_not_mistaken_for_in() {
        // `&in\b` must not eat the prefix of `&inout` and leave `out` behind.
        assert_eq!(normalize_type("int &inout"), "int");
    }

    #[test]
    fn reference_between_words_keeps_them_apart() {
        assert_eq!(normalize_type("a & b"), "a b");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_type("  unsigned \t  int  "), "unsigned int");
    }

    #[test]
    fn const_inside_identifier_is_kept() {
        assert_eq!(normalize_type("constant"), "constant");
        assert_eq!(normalize_type("myconst value"), "myconst value");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_type(""), "");
        assert_eq!(normalize_type("   "), "");
    }

    #[test]
    fn const_glued_to_marker_is_removed_in_one_pass() {
        assert_eq!(normalize_type("const&in x"), "x");
    }
}
