//! # Signatures
//!
//! The canonical callable shape produced by both sides of the drift check.
//!
//! A [`Signature`] keeps the declared text around (`raw_text`) so reports
//! can quote exactly what was written, while comparisons go through
//! [`normalize_type`](crate::normalize_type).

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_type;

/// Return type used when a declaration does not state one.
pub const VOID: &str = "void";

/// Words that may legally end a parameter without being its name.
const NON_NAME_TRAILERS: &[&str] = &["in", "out", "inout", "const"];

/// One callable signature, from either the schema or the binding source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Callable name (function or method name, without owning type).
    pub name: String,
    /// Declared return type, as written.
    pub return_type: String,
    /// Parameter types in declaration order, names already stripped.
    pub parameter_types: Vec<String>,
    /// The text the signature was built from.
    pub raw_text: String,
}

impl Signature {
    /// Build a signature from a raw parameter list.
    ///
    /// `params` is split on top-level commas and each parameter is reduced
    /// to its type with [`parameter_type`].
    pub fn from_parameter_list(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: &str,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameter_types: split_parameter_list(params)
                .iter()
                .map(|p| parameter_type(p))
                .collect(),
            raw_text: raw_text.into(),
        }
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Normalized return type.
    pub fn normalized_return_type(&self) -> String {
        normalize_type(&self.return_type)
    }

    /// Normalized parameter types, in order.
    pub fn normalized_parameter_types(&self) -> Vec<String> {
        self.parameter_types.iter().map(|t| normalize_type(t)).collect()
    }

    /// Two signatures are comparable when their normalized return types and
    /// normalized parameter-type sequences are equal. Names are not compared.
    pub fn is_comparable(&self, other: &Signature) -> bool {
        self.arity() == other.arity()
            && self.normalized_return_type() == other.normalized_return_type()
            && self.normalized_parameter_types() == other.normalized_parameter_types()
    }
}

/// Split a parameter list on commas that are not nested inside `<>`, `()`
/// or `[]`. Pieces are trimmed; empty pieces are dropped.
///
/// ```
/// use bindsync_core::split_parameter_list;
///
/// assert_eq!(
///     split_parameter_list("const dictionary<string, int> &in d, float x"),
///     vec!["const dictionary<string, int> &in d", "float x"],
/// );
/// ```
pub fn split_parameter_list(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for ch in params.chars() {
        match ch {
            '<' | '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Reduce one declared parameter to its type.
///
/// Drops a default value (`= ...`) and a trailing parameter-name token.
/// The trailing token is only treated as a name when something precedes
/// it and it is a plain identifier other than a reference-direction
/// keyword or `const`.
pub fn parameter_type(param: &str) -> String {
    let without_default = match top_level_find(param, '=') {
        Some(idx) => &param[..idx],
        None => param,
    };
    let trimmed = without_default.trim();

    if let Some((head, last)) = trimmed.rsplit_once(char::is_whitespace) {
        let head = head.trim_end();
        if !head.is_empty() && is_identifier(last) && !NON_NAME_TRAILERS.contains(&last) {
            return head.to_string();
        }
    }
    trimmed.to_string()
}

fn top_level_find(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
