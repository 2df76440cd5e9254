//! # bindsync-schema — API Schema Model
//!
//! Reads the authoritative API schema (a YAML document of categories and
//! types) and builds the canonical model of what the scripting host is
//! supposed to expose.
//!
//! ## Document (`document`)
//!
//! Serde types for the schema tree. Lists of declarations are read
//! leniently: an individual function, method or signature that does not
//! have the expected shape is skipped with a `debug` trace instead of
//! failing the whole document.
//!
//! ## Loading (`load`)
//!
//! [`load_document`] and [`parse_document`] turn a file or string into an
//! [`ApiDocument`]. Failing to read or parse the document as a whole is
//! fatal and reported as [`SchemaLoadError`].
//!
//! ## Model building (`model`)
//!
//! [`build_schema_model`] applies the binding-relevance flags and the
//! ambiguity tables from [`bindsync_core::MatchConfig`] and yields a
//! [`SchemaModel`]: global functions, object methods and callback names.
//!
//! ## Crate Policy
//!
//! - Depends only on `bindsync-core` internally.
//! - Never deduplicates: every declaration becomes its own entry.

pub mod document;
pub mod load;
pub mod model;

pub use document::{ApiDocument, CategoryDecl, FunctionDecl, SignatureDecl, TypeDecl};
pub use load::{load_document, parse_document, SchemaLoadError};
pub use model::{build_schema_model, SchemaEntry, SchemaModel};
