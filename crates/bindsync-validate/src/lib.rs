//! # bindsync-validate — Cross-Validation and Reporting
//!
//! Takes the two independently built models, the [`SchemaModel`] and the
//! [`BindingModel`], and decides for every schema entry whether the
//! binding source registers it, and for every registration whether the
//! schema accounts for it.
//!
//! ## Matching (`matcher`)
//!
//! [`cross_validate`] is a pure function of its inputs. Plain global
//! entries match by name. Entries declared in method-bearing categories
//! try, in order: a method on one of their candidate types, a method of
//! the same name on any type, a global function of the same name (factory
//! functions), and otherwise count as missing methods. Registrations whose
//! names carry an excluded prefix (operators, internals) are never drift.
//!
//! ## Reporting (`report`)
//!
//! [`Report`] flattens the [`ResultSets`] into counts and lists, renders
//! them as text or JSON, and decides the exit status: non-zero if and only
//! if anything is missing. Extras and unparsed registrations are reported
//! but never fail the run.
//!
//! [`SchemaModel`]: bindsync_schema::SchemaModel
//! [`BindingModel`]: bindsync_bindings::BindingModel

pub mod matcher;
pub mod report;

pub use matcher::{cross_validate, Extra, MatchRule, Matched, Missing, ResultSets};
pub use report::{
    BindingStats, EntryKind, ExtraItem, MissingItem, Report, SchemaStats, Summary, TextOptions,
    TextReport, UnparsedItem,
};
