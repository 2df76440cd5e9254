//! # bindsync-core — Foundational Types for bindsync
//!
//! This crate is the leaf of the bindsync workspace. It defines the
//! primitives shared by the schema side and the binding side of the
//! drift check, so that both parsers produce values that compare with
//! each other without any conversion layer in between.
//!
//! ## Key Design Principles
//!
//! 1. **One `Signature` shape for both sources.** The schema model builder
//!    and the binding extractor both emit [`Signature`]. Equality for
//!    comparison purposes always goes through [`normalize_type`].
//!
//! 2. **Nothing is overwritten.** Every canonical map is a [`Registry`],
//!    an insertion-ordered multimap. Overloads and cross-category
//!    duplicates accumulate as sequences under one key.
//!
//! 3. **Ambiguity tables are data.** Callback categories, method-bearing
//!    categories and excluded name prefixes live in [`MatchConfig`], which
//!    is passed into the builders and the matcher instead of being baked in.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bindsync-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod signature;

// Re-export primary types for ergonomic imports.
pub use config::{MatchConfig, MethodCategory};
pub use error::ConfigError;
pub use normalize::normalize_type;
pub use registry::{MethodKey, Registry};
pub use signature::{parameter_type, split_parameter_list, Signature, VOID};
