//! # Schema Document
//!
//! Serde types for the API schema tree:
//!
//! ```yaml
//! categories:
//!   - name: Graphics - Shapes
//!     functions:
//!       - name: drawRect
//!         sketch: true
//!         return: void
//!         signatures:
//!           - params: "float x, float y, float w, float h"
//!             params_simple: "x, y, w, h"
//! types:
//!   - name: Vec2
//!     methods:
//!       - name: length
//!         return: float
//!     static_methods:
//!       - name: fromAngle
//!         signatures:
//!           - params: "float radians"
//! ```
//!
//! Only the fields the drift check reads are modelled; anything else in the
//! document (descriptions, snippets, constants, keywords) is ignored.
//!
//! Declaration lists are deserialized leniently. Each element is decoded on
//! its own and an element that does not fit its type is dropped with a
//! `debug` trace. A malformed declaration therefore looks exactly like an
//! absent one to everything downstream.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Root of the API schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Function categories, in document order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Vec<CategoryDecl>,
    /// Object types, in document order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub types: Vec<TypeDecl>,
}

/// A named group of free functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDecl {
    /// Category name, matched against the callback and method tables.
    pub name: String,
    /// Functions declared in this category.
    #[serde(default, deserialize_with = "lenient_list")]
    pub functions: Vec<FunctionDecl>,
}

/// A function, method or static method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Callable name.
    pub name: String,
    /// Binding-relevance flag, kept as written. Any YAML value is accepted
    /// so an odd flag never drops the declaration; see
    /// [`FunctionDecl::is_flagged`] and [`FunctionDecl::is_unflagged`].
    #[serde(default)]
    pub sketch: Option<serde_yaml::Value>,
    /// Declared return type.
    #[serde(default, rename = "return")]
    pub return_type: Option<String>,
    /// Overloads. `None` when the key is absent, which matters for
    /// instance methods (they get one implicit parameterless signature).
    #[serde(default, deserialize_with = "lenient_opt_list")]
    pub signatures: Option<Vec<SignatureDecl>>,
}

impl FunctionDecl {
    /// Whether the flag is set to a truthy value. Absent, `null`, `false`,
    /// zero, NaN and the empty string are falsy; everything else, including
    /// strings such as `yes` or `"false"`, is truthy.
    pub fn is_flagged(&self) -> bool {
        self.sketch.as_ref().is_some_and(is_truthy)
    }

    /// Whether the flag is literally the boolean `false`.
    pub fn is_unflagged(&self) -> bool {
        matches!(self.sketch, Some(serde_yaml::Value::Bool(false)))
    }
}

fn is_truthy(value: &serde_yaml::Value) -> bool {
    use serde_yaml::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => match n.as_f64() {
            Some(f) => f != 0.0 && !f.is_nan(),
            None => true,
        },
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// One overload of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDecl {
    /// Full typed parameter list, e.g. `"float x, float y"`.
    #[serde(default)]
    pub params: Option<String>,
    /// Simplified parameter list, e.g. `"x, y"`.
    #[serde(default)]
    pub params_simple: Option<String>,
}

impl SignatureDecl {
    /// The parameter text the model uses: the simplified list when it is
    /// present and non-empty, else the typed list, else empty.
    pub fn parameter_text(&self) -> &str {
        self.params_simple
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.params.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}

/// An object type with instance and static methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Type name as exposed to scripts.
    pub name: String,
    /// Instance methods.
    #[serde(default, deserialize_with = "lenient_list")]
    pub methods: Vec<FunctionDecl>,
    /// Static methods, exposed as free functions by the host.
    #[serde(default, deserialize_with = "lenient_list")]
    pub static_methods: Vec<FunctionDecl>,
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_opt_list(deserializer)?.unwrap_or_default())
}

fn lenient_opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_yaml::Value::deserialize(deserializer)?;
    let items = match raw {
        serde_yaml::Value::Null => return Ok(None),
        serde_yaml::Value::Sequence(items) => items,
        other => {
            tracing::debug!(value = ?other, "expected a list of declarations; ignoring");
            return Ok(Some(Vec::new()));
        }
    };

    let decoded = items
        .into_iter()
        .filter_map(|item| match serde_yaml::from_value::<T>(item) {
            Ok(decl) => Some(decl),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed schema declaration");
                None
            }
        })
        .collect();
    Ok(Some(decoded))
}
