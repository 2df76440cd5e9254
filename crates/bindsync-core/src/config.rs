//! # Match Configuration
//!
//! The ambiguity tables that steer schema model building and cross
//! validation: which schema categories hold host callbacks, which hold
//! object methods (and for which types), and which registered names are
//! operators or internals that never count as drift.
//!
//! [`MatchConfig::default`] carries the stock tables for the TrussC
//! scripting host. A YAML file may override any subset of keys; keys left
//! out keep their stock values.
//!
//! ```yaml
//! callback_categories: [Lifecycle, Events]
//! method_categories:
//!   - category: Sound
//!     types: [Sound]
//! global_excluded_prefixes: [op, _]
//! method_excluded_prefixes: [op]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A schema category whose functions are really methods on one of `types`.
///
/// `types` is ordered: earlier entries win when more than one type
/// registers a method of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodCategory {
    /// Schema category name.
    pub category: String,
    /// Candidate owning types, in priority order.
    #[serde(default)]
    pub types: Vec<String>,
}

impl MethodCategory {
    fn new(category: &str, types: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ambiguity tables for one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Categories whose flagged functions are host callbacks, not bindings.
    pub callback_categories: Vec<String>,
    /// Categories whose functions are object methods.
    pub method_categories: Vec<MethodCategory>,
    /// Registered global names starting with any of these are ignored.
    pub global_excluded_prefixes: Vec<String>,
    /// Registered method names starting with any of these are ignored.
    pub method_excluded_prefixes: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            callback_categories: vec!["Lifecycle".to_string(), "Events".to_string()],
            method_categories: vec![
                MethodCategory::new("Sound", &["Sound"]),
                MethodCategory::new("ChipSound", &["ChipSoundNote", "ChipSoundBundle"]),
                MethodCategory::new("Font", &["Font"]),
                MethodCategory::new("Animation", &["Tween"]),
                MethodCategory::new("3D Camera", &["EasyCam"]),
                MethodCategory::new("Graphics - FBO", &["Fbo"]),
                MethodCategory::new("Graphics - Texture & GPU", &["Texture"]),
                MethodCategory::new("Types - Mesh", &["Mesh"]),
                MethodCategory::new("Types - Path", &["Path"]),
                MethodCategory::new("Types - StrokeMesh", &["StrokeMesh"]),
                MethodCategory::new("Types - Pixels", &["Pixels"]),
                MethodCategory::new("Image", &["Image"]),
            ],
            global_excluded_prefixes: vec!["op".to_string(), "_".to_string()],
            method_excluded_prefixes: vec!["op".to_string()],
        }
    }
}

impl MatchConfig {
    /// An empty configuration: no callbacks, no method categories, no
    /// exclusions.
    pub fn empty() -> Self {
        Self {
            callback_categories: Vec::new(),
            method_categories: Vec::new(),
            global_excluded_prefixes: Vec::new(),
            method_excluded_prefixes: Vec::new(),
        }
    }

    /// Parse a YAML configuration. `origin` labels the source in errors.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&text, &path.display().to_string())
    }

    /// Whether `category` holds host callbacks.
    pub fn is_callback_category(&self, category: &str) -> bool {
        self.callback_categories.iter().any(|c| c == category)
    }

    /// Candidate types for a method-bearing category, or `None` when the
    /// category holds plain global functions.
    pub fn candidate_types(&self, category: &str) -> Option<&[String]> {
        self.method_categories
            .iter()
            .find(|m| m.category == category)
            .map(|m| m.types.as_slice())
    }

    /// Whether a registered global function name is an operator or internal.
    pub fn is_excluded_global(&self, name: &str) -> bool {
        has_any_prefix(name, &self.global_excluded_prefixes)
    }

    /// Whether a registered method name is an operator.
    pub fn is_excluded_method(&self, name: &str) -> bool {
        has_any_prefix(name, &self.method_excluded_prefixes)
    }
}

fn has_any_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| name.starts_with(p.as_str()))
}
