//! # Schema Model Builder
//!
//! Walks an [`ApiDocument`] and produces the canonical [`SchemaModel`].
//!
//! ## Inclusion rules
//!
//! - Category functions are included only when `sketch` is truthy.
//! - Instance and static methods on types are included unless
//!   `sketch` is literally `false`. Absence of the flag, or any other
//!   value, means include, unlike category functions.
//! - Functions in a callback category become callback names instead of
//!   entries.
//! - Functions in a method-bearing category become global entries marked
//!   as object-method candidates, carrying the category's candidate types.
//! - Static methods become global entries marked `is_static`.
//!
//! Nothing is deduplicated. Two declarations of the same name produce two
//! entries under that name, in document order.

use std::collections::BTreeSet;

use serde::Serialize;

use bindsync_core::{MatchConfig, MethodKey, Registry, Signature, VOID};

use crate::document::{ApiDocument, FunctionDecl, SignatureDecl};

/// One schema-declared callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    /// Callable name.
    pub name: String,
    /// Declared overloads.
    pub signatures: Vec<Signature>,
    /// Declaring category, for category functions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_category: Option<String>,
    /// Declaring type, for instance and static methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Declared in a method-bearing category.
    pub is_object_method_candidate: bool,
    /// Candidate owning types, in priority order. Empty unless
    /// `is_object_method_candidate`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidate_types: Vec<String>,
    /// Declared as a static method on `type_name`.
    pub is_static: bool,
}

/// Canonical model of what the schema says should be callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    /// Category functions and static methods, by name.
    pub global_functions: Registry<String, SchemaEntry>,
    /// Instance methods, by `(type, method)`.
    pub object_methods: Registry<MethodKey, SchemaEntry>,
    /// Names declared in callback categories.
    pub callbacks: BTreeSet<String>,
}

impl SchemaModel {
    /// Whether `name` is a host callback.
    pub fn is_callback(&self, name: &str) -> bool {
        self.callbacks.contains(name)
    }

    /// Total number of entries, globals and methods together.
    pub fn entry_count(&self) -> usize {
        self.global_functions.value_count() + self.object_methods.value_count()
    }
}

/// Build the schema model from a parsed document.
pub fn build_schema_model(doc: &ApiDocument, config: &MatchConfig) -> SchemaModel {
    let mut model = SchemaModel::default();

    for category in &doc.categories {
        if config.is_callback_category(&category.name) {
            for func in category.functions.iter().filter(|f| f.is_flagged()) {
                model.callbacks.insert(func.name.clone());
            }
            continue;
        }

        let candidates = config.candidate_types(&category.name);

        for func in &category.functions {
            if !func.is_flagged() {
                tracing::trace!(name = %func.name, category = %category.name, "not bindable; skipped");
                continue;
            }

            let signatures = func
                .signatures
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|sig| signature_from_decl(func, sig))
                .collect();

            let entry = SchemaEntry {
                name: func.name.clone(),
                signatures,
                source_category: Some(category.name.clone()),
                type_name: None,
                is_object_method_candidate: candidates.is_some(),
                candidate_types: candidates.map(<[String]>::to_vec).unwrap_or_default(),
                is_static: false,
            };
            model.global_functions.push(func.name.clone(), entry);
        }
    }

    for ty in &doc.types {
        for method in ty.methods.iter().filter(|m| !m.is_unflagged()) {
            let signatures = match method.signatures.as_deref() {
                Some(sigs) => sigs.iter().map(|sig| signature_from_decl(method, sig)).collect(),
                None => vec![signature_from_decl(method, &SignatureDecl::default())],
            };

            let entry = SchemaEntry {
                name: method.name.clone(),
                signatures,
                source_category: None,
                type_name: Some(ty.name.clone()),
                is_object_method_candidate: false,
                candidate_types: Vec::new(),
                is_static: false,
            };
            model
                .object_methods
                .push(MethodKey::new(&ty.name, &method.name), entry);
        }

        for method in ty.static_methods.iter().filter(|m| !m.is_unflagged()) {
            let signatures = method
                .signatures
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|sig| signature_from_decl(method, sig))
                .collect();

            let entry = SchemaEntry {
                name: method.name.clone(),
                signatures,
                source_category: None,
                type_name: Some(ty.name.clone()),
                is_object_method_candidate: false,
                candidate_types: Vec::new(),
                is_static: true,
            };
            model.global_functions.push(method.name.clone(), entry);
        }
    }

    tracing::info!(
        global_functions = model.global_functions.len(),
        object_methods = model.object_methods.len(),
        callbacks = model.callbacks.len(),
        "built schema model"
    );

    model
}

fn signature_from_decl(func: &FunctionDecl, sig: &SignatureDecl) -> Signature {
    let return_type = func
        .return_type
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(VOID);
    let params = sig.parameter_text();
    let raw_text = format!("{return_type} {}({params})", func.name);
    Signature::from_parameter_list(&func.name, return_type, params, raw_text)
}
