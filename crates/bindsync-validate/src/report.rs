//! # Report
//!
//! Flattens [`ResultSets`] plus model statistics into a serializable
//! [`Report`], and renders it as text for terminals or JSON for tooling.
//!
//! The exit status lives here too: `1` if anything the schema declares is
//! missing from the bindings, `0` otherwise. Extras, exclusions and
//! unparsed registrations never affect it.

use std::fmt;

use serde::Serialize;

use bindsync_bindings::BindingModel;
use bindsync_schema::SchemaModel;

use crate::matcher::{Extra, Missing, ResultSets};

const RULE_WIDTH: usize = 60;

/// Which registry an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Global function.
    Global,
    /// Object method.
    Method,
}

/// Size of the schema model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaStats {
    /// Distinct global function names.
    pub global_functions: usize,
    /// Global entries, counting duplicates.
    pub global_entries: usize,
    /// Distinct `Type.method` keys.
    pub object_methods: usize,
    /// Callback names.
    pub callbacks: usize,
}

/// Size of the binding model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingStats {
    /// Distinct registered global function names.
    pub global_functions: usize,
    /// Distinct registered `Type.method` keys.
    pub object_methods: usize,
    /// Distinct registered object types.
    pub object_types: usize,
    /// Registrations whose declaration did not parse.
    pub unparsed: usize,
}

/// Bucket counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Entries matched against a global registration.
    pub matched_global: usize,
    /// Entries matched against a method registration.
    pub matched_method: usize,
    /// Plain global entries with no registration.
    pub missing_global: usize,
    /// Method entries with no registration.
    pub missing_method: usize,
    /// Registered global names the schema does not declare.
    pub extra_global: usize,
    /// Registered `Type.method` keys the schema does not declare.
    pub extra_method: usize,
    /// Registered keys skipped by an excluded prefix.
    pub excluded: usize,
    /// Registrations whose declaration did not parse.
    pub unparsed: usize,
}

impl Summary {
    /// Matched schema entries.
    pub fn matched(&self) -> usize {
        self.matched_global + self.matched_method
    }

    /// Missing schema entries.
    pub fn missing(&self) -> usize {
        self.missing_global + self.missing_method
    }

    /// Extra registration keys.
    pub fn extra(&self) -> usize {
        self.extra_global + self.extra_method
    }
}

/// A schema entry with no registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingItem {
    /// Registry the entry was expected in.
    pub kind: EntryKind,
    /// Name, or `Type.method` for schema type methods.
    pub key: String,
    /// Declaring category, for category functions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Declaring type, for type methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// A registration the schema does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraItem {
    /// Registry the registration lives in.
    pub kind: EntryKind,
    /// Registered name or `Type.method`.
    pub key: String,
    /// Source lines of every registration under `key`.
    pub lines: Vec<usize>,
}

/// A registration whose declaration could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnparsedItem {
    /// Registration call name, e.g. `RegisterGlobalFunction`.
    pub call: String,
    /// The quoted declaration as written.
    pub declaration: String,
    /// 1-based source line of the call.
    pub line: usize,
}

/// Complete outcome of a drift check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Label of the schema input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_origin: Option<String>,
    /// Label of the binding source input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings_origin: Option<String>,
    /// Size of the schema model.
    pub schema: SchemaStats,
    /// Size of the binding model.
    pub bindings: BindingStats,
    /// Bucket counts.
    pub summary: Summary,
    /// Missing entries, globals first.
    pub missing: Vec<MissingItem>,
    /// Extra registrations, globals first.
    pub extra: Vec<ExtraItem>,
    /// Registrations whose declaration did not parse.
    pub unparsed: Vec<UnparsedItem>,
    /// True when nothing is missing.
    pub passed: bool,
}

/// Text rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// List extra registrations. Counts are always shown.
    pub show_extras: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { show_extras: true }
    }
}

impl Report {
    /// Assemble a report from both models and the validation result.
    pub fn new(schema: &SchemaModel, bindings: &BindingModel, results: &ResultSets) -> Self {
        let summary = Summary {
            matched_global: results.matched_global.len(),
            matched_method: results.matched_method.len(),
            missing_global: results.missing_global.len(),
            missing_method: results.missing_method.len(),
            extra_global: results.extra_global.len(),
            extra_method: results.extra_method.len(),
            excluded: results.excluded.len(),
            unparsed: bindings.unparsed.len(),
        };

        let missing = results
            .missing_global
            .iter()
            .map(|m| missing_item(EntryKind::Global, m))
            .chain(
                results
                    .missing_method
                    .iter()
                    .map(|m| missing_item(EntryKind::Method, m)),
            )
            .collect();

        let extra = results
            .extra_global
            .iter()
            .map(|e| extra_item(EntryKind::Global, e))
            .chain(
                results
                    .extra_method
                    .iter()
                    .map(|e| extra_item(EntryKind::Method, e)),
            )
            .collect();

        let unparsed = bindings
            .unparsed
            .iter()
            .map(|reg| UnparsedItem {
                call: reg.kind.call_name().to_string(),
                declaration: reg.kind.declaration().unwrap_or_default().to_string(),
                line: reg.line,
            })
            .collect();

        Self {
            schema_origin: None,
            bindings_origin: None,
            schema: SchemaStats {
                global_functions: schema.global_functions.len(),
                global_entries: schema.global_functions.value_count(),
                object_methods: schema.object_methods.len(),
                callbacks: schema.callbacks.len(),
            },
            bindings: BindingStats {
                global_functions: bindings.global_functions.len(),
                object_methods: bindings.object_methods.len(),
                object_types: bindings.object_types.len(),
                unparsed: bindings.unparsed.len(),
            },
            passed: !results.has_missing(),
            summary,
            missing,
            extra,
            unparsed,
        }
    }

    /// Attach the labels of the two inputs, used in headers and extra
    /// locations.
    pub fn with_origins(mut self, schema: impl Into<String>, bindings: impl Into<String>) -> Self {
        self.schema_origin = Some(schema.into());
        self.bindings_origin = Some(bindings.into());
        self
    }

    /// Process exit status: 1 if anything is missing, else 0.
    pub fn exit_code(&self) -> u8 {
        if self.summary.missing() > 0 {
            1
        } else {
            0
        }
    }

    /// Text rendering, for `Display`.
    pub fn text(&self, options: TextOptions) -> TextReport<'_> {
        TextReport {
            report: self,
            options,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn missing_item(kind: EntryKind, missing: &Missing) -> MissingItem {
    MissingItem {
        kind,
        key: missing.key.clone(),
        category: missing.entry.source_category.clone(),
        type_name: missing.entry.type_name.clone(),
    }
}

fn extra_item(kind: EntryKind, extra: &Extra) -> ExtraItem {
    ExtraItem {
        kind,
        key: extra.key.clone(),
        lines: extra.lines.clone(),
    }
}

/// A [`Report`] rendered as human-readable text.
pub struct TextReport<'a> {
    report: &'a Report,
    options: TextOptions,
}

impl TextReport<'_> {
    fn locations(&self, lines: &[usize]) -> String {
        let rendered: Vec<String> = match &self.report.bindings_origin {
            Some(origin) => lines.iter().map(|l| format!("{origin}:{l}")).collect(),
            None => lines.iter().map(|l| format!("line {l}")).collect(),
        };
        rendered.join(", ")
    }

    fn write_missing(&self, f: &mut fmt::Formatter<'_>, kind: EntryKind) -> fmt::Result {
        let header = match kind {
            EntryKind::Global => "[MISSING GLOBAL]",
            EntryKind::Method => "[MISSING METHOD]",
        };
        let items: Vec<_> = self.report.missing.iter().filter(|i| i.kind == kind).collect();
        if items.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "{header} {}", items.len())?;
        for item in items {
            match (&item.type_name, &item.category) {
                (Some(ty), _) => writeln!(f, "  - [{ty}] {}", item.key)?,
                (None, Some(category)) => writeln!(f, "  - {} ({category})", item.key)?,
                (None, None) => writeln!(f, "  - {}", item.key)?,
            }
        }
        Ok(())
    }

    fn write_extra(&self, f: &mut fmt::Formatter<'_>, kind: EntryKind) -> fmt::Result {
        let header = match kind {
            EntryKind::Global => "[EXTRA GLOBAL]",
            EntryKind::Method => "[EXTRA METHOD]",
        };
        let items: Vec<_> = self.report.extra.iter().filter(|i| i.kind == kind).collect();
        if items.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "{header} {}", items.len())?;
        for item in items {
            writeln!(f, "  - {} ({})", item.key, self.locations(&item.lines))?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "Binding consistency check")?;
        writeln!(f, "{rule}")?;
        if let Some(origin) = &report.schema_origin {
            writeln!(f, "Schema:   {origin}")?;
        }
        if let Some(origin) = &report.bindings_origin {
            writeln!(f, "Bindings: {origin}")?;
        }
        writeln!(
            f,
            "Schema model:  {} global functions ({} entries), {} object methods, {} callbacks",
            report.schema.global_functions,
            report.schema.global_entries,
            report.schema.object_methods,
            report.schema.callbacks,
        )?;
        writeln!(
            f,
            "Binding model: {} global functions, {} object methods, {} object types",
            report.bindings.global_functions,
            report.bindings.object_methods,
            report.bindings.object_types,
        )?;

        self.write_missing(f, EntryKind::Global)?;
        self.write_missing(f, EntryKind::Method)?;

        if self.options.show_extras {
            self.write_extra(f, EntryKind::Global)?;
            self.write_extra(f, EntryKind::Method)?;
        }

        if !report.unparsed.is_empty() {
            writeln!(f)?;
            writeln!(f, "[UNPARSED] {}", report.unparsed.len())?;
            for item in &report.unparsed {
                writeln!(
                    f,
                    "  - {} {}(\"{}\")",
                    self.locations(&[item.line]),
                    item.call,
                    item.declaration
                )?;
            }
        }

        if report.passed {
            writeln!(f)?;
            writeln!(f, "[OK] All schema bindable functions are bound!")?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Summary: {} matched, {} missing, {} extra",
            report.summary.matched(),
            report.summary.missing(),
            report.summary.extra(),
        )?;
        write!(f, "{rule}")
    }
}
