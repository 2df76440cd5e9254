//! # Cross-Validator
//!
//! The matching engine between the schema model and the binding model.
//!
//! ## Schema side
//!
//! Callback-category functions never reach the schema model's globals, so
//! every global schema entry is checked, including one that shares its
//! name with a callback but is declared in an ordinary category:
//!
//! - not an object-method candidate: matched if a global function of the
//!   same name is registered, else missing (global);
//! - object-method candidate, first rule that succeeds wins:
//!   1. `candidate_type.name` is a registered method, trying candidate
//!      types in their configured order;
//!   2. any registered method named `name`, in registration order;
//!   3. a registered global function named `name` (factory functions such
//!      as `createSound`), recorded as a global match;
//!   4. otherwise missing (method).
//!
//! Rule 1 always beats rule 2, so a declared type wins over an incidental
//! name collision on another type. Rule 2 beats rule 3.
//!
//! Each instance-method entry declared on a schema type is matched if
//! `Type.name` is a registered method, else missing (method).
//!
//! ## Binding side
//!
//! A registered global function is excluded if its name has an excluded
//! global prefix, accounted for if the schema has any global entry of that
//! name, and extra otherwise. A registered method is excluded if its
//! method name has an excluded method prefix, accounted for if the schema
//! declares `Type.name` directly or has an object-method candidate named
//! `name` whose candidate types are empty or include `Type`, and extra
//! otherwise.
//!
//! Every entry lands in exactly one bucket.

use serde::Serialize;

use bindsync_bindings::BindingModel;
use bindsync_core::{MatchConfig, MethodKey};
use bindsync_schema::{SchemaEntry, SchemaModel};

/// The rule that matched a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Plain global function found by name.
    GlobalName,
    /// Method found on one of the entry's candidate types.
    CandidateType,
    /// Method found by name on some other registered type.
    AnyTypeByName,
    /// Method-category entry registered as a global function.
    GlobalFactory,
    /// Schema type method found under the same `Type.name`.
    TypeMethod,
}

/// A schema entry with a corresponding registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matched {
    /// Registration key the entry matched: a name or `Type.method`.
    pub key: String,
    /// Rule that produced the match.
    pub rule: MatchRule,
    /// The schema entry.
    pub entry: SchemaEntry,
}

/// A schema entry with no corresponding registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Missing {
    /// Name for global and method-category entries, `Type.method` for
    /// schema type methods.
    pub key: String,
    /// The schema entry.
    pub entry: SchemaEntry,
}

/// A registration the schema does not account for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extra {
    /// Registered name or `Type.method`.
    pub key: String,
    /// Source lines of every registration under this key.
    pub lines: Vec<usize>,
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSets {
    /// Entries matched against a global registration.
    pub matched_global: Vec<Matched>,
    /// Entries matched against a method registration.
    pub matched_method: Vec<Matched>,
    /// Plain global entries with no registration.
    pub missing_global: Vec<Missing>,
    /// Method-category entries and type methods with no registration.
    pub missing_method: Vec<Missing>,
    /// Registered globals the schema does not declare.
    pub extra_global: Vec<Extra>,
    /// Registered methods the schema does not declare.
    pub extra_method: Vec<Extra>,
    /// Registered global keys accounted for by the schema.
    pub covered_global: Vec<String>,
    /// Registered method keys accounted for by the schema.
    pub covered_method: Vec<String>,
    /// Registered keys skipped by an excluded prefix.
    pub excluded: Vec<String>,
}

impl ResultSets {
    /// Number of matched schema entries.
    pub fn matched_count(&self) -> usize {
        self.matched_global.len() + self.matched_method.len()
    }

    /// Number of missing schema entries.
    pub fn missing_count(&self) -> usize {
        self.missing_global.len() + self.missing_method.len()
    }

    /// Number of extra registration keys.
    pub fn extra_count(&self) -> usize {
        self.extra_global.len() + self.extra_method.len()
    }

    /// Whether anything declared in the schema is missing.
    pub fn has_missing(&self) -> bool {
        self.missing_count() > 0
    }
}

/// Match the schema model against the binding model.
pub fn cross_validate(
    schema: &SchemaModel,
    bindings: &BindingModel,
    config: &MatchConfig,
) -> ResultSets {
    let mut results = ResultSets::default();

    for (name, entries) in schema.global_functions.iter() {
        for entry in entries {
            if entry.is_object_method_candidate {
                match_method_candidate(name, entry, bindings, &mut results);
            } else {
                match_global(name, entry, bindings, &mut results);
            }
        }
    }

    for (key, entries) in schema.object_methods.iter() {
        for entry in entries {
            if bindings.object_methods.contains_key(key) {
                results.matched_method.push(Matched {
                    key: key.to_string(),
                    rule: MatchRule::TypeMethod,
                    entry: entry.clone(),
                });
            } else {
                tracing::debug!(method = %key, "type method missing");
                results.missing_method.push(Missing {
                    key: key.to_string(),
                    entry: entry.clone(),
                });
            }
        }
    }

    for (name, regs) in bindings.global_functions.iter() {
        if config.is_excluded_global(name) {
            results.excluded.push(name.clone());
        } else if schema.global_functions.contains_str(name) {
            results.covered_global.push(name.clone());
        } else {
            results.extra_global.push(Extra {
                key: name.clone(),
                lines: regs.iter().map(|r| r.line).collect(),
            });
        }
    }

    for (key, regs) in bindings.object_methods.iter() {
        if config.is_excluded_method(&key.method) {
            results.excluded.push(key.to_string());
        } else if schema.object_methods.contains_key(key) || candidate_covers(schema, key) {
            results.covered_method.push(key.to_string());
        } else {
            results.extra_method.push(Extra {
                key: key.to_string(),
                lines: regs.iter().map(|r| r.line).collect(),
            });
        }
    }

    tracing::info!(
        matched = results.matched_count(),
        missing = results.missing_count(),
        extra = results.extra_count(),
        excluded = results.excluded.len(),
        "cross-validation finished"
    );

    results
}

fn match_global(name: &str, entry: &SchemaEntry, bindings: &BindingModel, results: &mut ResultSets) {
    if bindings.global_functions.contains_str(name) {
        results.matched_global.push(Matched {
            key: name.to_string(),
            rule: MatchRule::GlobalName,
            entry: entry.clone(),
        });
    } else {
        tracing::debug!(name, category = ?entry.source_category, "global function missing");
        results.missing_global.push(Missing {
            key: name.to_string(),
            entry: entry.clone(),
        });
    }
}

fn match_method_candidate(
    name: &str,
    entry: &SchemaEntry,
    bindings: &BindingModel,
    results: &mut ResultSets,
) {
    let on_candidate = entry
        .candidate_types
        .iter()
        .map(|ty| MethodKey::new(ty, name))
        .find(|key| bindings.object_methods.contains_key(key));

    if let Some(key) = on_candidate {
        results.matched_method.push(Matched {
            key: key.to_string(),
            rule: MatchRule::CandidateType,
            entry: entry.clone(),
        });
        return;
    }

    if let Some(key) = bindings.methods_named(name).next() {
        tracing::debug!(name, matched = %key, "method matched on a non-candidate type");
        results.matched_method.push(Matched {
            key: key.to_string(),
            rule: MatchRule::AnyTypeByName,
            entry: entry.clone(),
        });
        return;
    }

    if bindings.global_functions.contains_str(name) {
        results.matched_global.push(Matched {
            key: name.to_string(),
            rule: MatchRule::GlobalFactory,
            entry: entry.clone(),
        });
        return;
    }

    tracing::debug!(name, category = ?entry.source_category, "method missing");
    results.missing_method.push(Missing {
        key: name.to_string(),
        entry: entry.clone(),
    });
}

/// Whether a method-category entry accounts for the registered `key`.
fn candidate_covers(schema: &SchemaModel, key: &MethodKey) -> bool {
    schema
        .global_functions
        .get_str(&key.method)
        .unwrap_or_default()
        .iter()
        .any(|e| {
            e.is_object_method_candidate
                && (e.candidate_types.is_empty() || e.candidate_types.contains(&key.type_name))
        })
}
