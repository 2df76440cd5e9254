//! # bindsync-bindings — Binding Source Extraction
//!
//! Scans native binding source text for the registration call-sites that
//! expose functions, methods and types to the embedded scripting runtime,
//! and reduces them into the canonical [`BindingModel`].
//!
//! ## Grammar
//!
//! Extraction is pattern based and intentionally lossy. It does not parse
//! C++; it looks for three call shapes anywhere in the text:
//!
//! ```text
//! RegisterGlobalFunction ( "<decl>"
//! RegisterObjectMethod   ( "<Type>" , "<decl>"
//! RegisterObjectType     ( "<Type>"
//! ```
//!
//! and then reads `<decl>` as `<return> <name>(<params>) [const]`.
//! Calls built from macros or string concatenation are invisible to it.
//!
//! ## Stages
//!
//! 1. [`extract_registrations`] (behind the [`RegistrationExtractor`]
//!    trait) returns every call-site as a [`RawRegistration`], in source
//!    order per call shape. No maps are built here.
//! 2. [`BindingModel::from_registrations`] parses each declaration and
//!    folds the results into registries. Declarations that do not parse
//!    go to [`BindingModel::unparsed`] rather than disappearing.

pub mod declaration;
pub mod extract;
pub mod model;

pub use declaration::{parse_declaration, DeclarationError};
pub use extract::{
    extract_registrations, AngelScriptExtractor, RawRegistration, RegistrationExtractor,
    RegistrationKind,
};
pub use model::{BindingEntry, BindingModel};
