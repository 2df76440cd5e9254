//! # Declaration Parsing
//!
//! Reads a registration declaration string such as
//! `"Vec2 opAdd(const Vec2 &in) const"` into a [`Signature`].
//!
//! Accepted shape: `<return> <name>(<params>)`, optionally followed by a
//! trailing `const`. The parameter list may not contain nested parentheses.
//! Anything else is a [`DeclarationError`].

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use bindsync_core::Signature;

static TRAILING_CONST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+const\s*$").expect("static regex"));

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+(\w+)\s*\(([^)]*)\)$").expect("static regex")
});

/// A declaration string that does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Not of the form `<return> <name>(<params>)`.
    #[error("declaration does not match '<return> <name>(<params>)': {0:?}")]
    Shape(String),
}

/// Parse one declaration string.
///
/// ```
/// use bindsync_bindings::parse_declaration;
///
/// let sig = parse_declaration("void drawRect(float x, float y, float w, float h)").unwrap();
/// assert_eq!(sig.name, "drawRect");
/// assert_eq!(sig.parameter_types, vec!["float", "float", "float", "float"]);
/// ```
pub fn parse_declaration(declaration: &str) -> Result<Signature, DeclarationError> {
    let text = declaration.trim();
    let text = TRAILING_CONST_RE.replace(text, "");

    let caps = DECLARATION_RE
        .captures(&text)
        .ok_or_else(|| DeclarationError::Shape(declaration.to_string()))?;

    let (Some(ret), Some(name), Some(params)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(DeclarationError::Shape(declaration.to_string()));
    };

    Ok(Signature::from_parameter_list(
        name.as_str(),
        ret.as_str().trim(),
        params.as_str(),
        text.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_global() {
        let sig = parse_declaration("void drawRect(float,float,float,float)").unwrap();
        assert_eq!(sig.name, "drawRect");
        assert_eq!(sig.return_type, "void");
        assert_eq!(sig.parameter_types, vec!["float"; 4]);
    }

    #[test]
    fn strips_trailing_const() {
        let sig = parse_declaration("float getWidth() const").unwrap();
        assert_eq!(sig.name, "getWidth");
        assert_eq!(sig.return_type, "float");
        assert!(sig.parameter_types.is_empty());
        assert_eq!(sig.raw_text, "float getWidth()");
    }

    #[test]
    fn handles_qualified_return_types() {
        let sig = parse_declaration("const string& getName() const").unwrap();
        assert_eq!(sig.name, "getName");
        assert_eq!(sig.return_type, "const string&");

        let sig = parse_declaration("Sound@ createSound(const string &in path)").unwrap();
        assert_eq!(sig.return_type, "Sound@");
        assert_eq!(sig.parameter_types, vec!["const string &in"]);
    }

    #[test]
    fn templates_in_parameters() {
        let sig =
            parse_declaration("void setVertices(const array<Vec3> &in verts, int count)").unwrap();
        assert_eq!(sig.parameter_types, vec!["const array<Vec3> &in", "int"]);
    }

    #[test]
    fn operator_declarations_parse() {
        let sig = parse_declaration("Vec2 opAdd(const Vec2 &in) const").unwrap();
        assert_eq!(sig.name, "opAdd");
        assert_eq!(sig.parameter_types, vec!["const Vec2 &in"]);
    }

    #[test]
    fn missing_return_type_is_rejected() {
        let err = parse_declaration("setup()").unwrap_err();
        assert_eq!(err, DeclarationError::Shape("setup()".into()));
    }

    #[test]
    fn nested_parentheses_are_rejected() {
        assert!(parse_declaration("void f(int (x))").is_err());
    }

    #[test]
    fn non_declarations_are_rejected() {
        assert!(parse_declaration("").is_err());
        assert!(parse_declaration("float").is_err());
        assert!(parse_declaration("void f(int").is_err());
        assert!(parse_declaration("void f() extra").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let sig = parse_declaration("  void  clear ( )  ").unwrap();
        assert_eq!(sig.name, "clear");
        assert_eq!(sig.return_type, "void");
    }
}
