//! # Check Subcommand
//!
//! `bindsync check` loads the schema and the binding source, runs the
//! cross-validation, prints the report on stdout and returns the exit
//! status: 0 when every bindable schema entry is registered, 1 otherwise.
//!
//! Unreadable or unparseable inputs are errors, not drift. They propagate
//! to `main`, which exits with [`EXIT_INPUT_ERROR`](crate::EXIT_INPUT_ERROR).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use bindsync_bindings::BindingModel;
use bindsync_core::MatchConfig;
use bindsync_schema::{build_schema_model, load_document};
use bindsync_validate::{cross_validate, Report, TextOptions};

use crate::{resolve_path, DEFAULT_BINDINGS_PATH, DEFAULT_SCHEMA_PATH};

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable sections and summary.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// API schema document (YAML).
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Host source file containing the AngelScript registrations.
    #[arg(long, default_value = DEFAULT_BINDINGS_PATH)]
    pub bindings: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Omit the extra-registration sections from text output.
    #[arg(long)]
    pub quiet_extras: bool,
}

/// Load the matching tables from `path`, or the stock tables when no
/// config file is given.
pub fn load_config(path: Option<&Path>, root: &Path) -> Result<MatchConfig> {
    match path {
        Some(path) => {
            let resolved = resolve_path(path, root);
            let config = MatchConfig::load(&resolved)
                .with_context(|| format!("loading match config {}", resolved.display()))?;
            tracing::debug!(path = %resolved.display(), "loaded match config");
            Ok(config)
        }
        None => Ok(MatchConfig::default()),
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: &MatchConfig, root: &Path) -> Result<u8> {
    let report = build_report(args, config, root)?;

    match args.format {
        OutputFormat::Text => {
            let options = TextOptions {
                show_extras: !args.quiet_extras,
            };
            println!("{}", report.text(options));
        }
        OutputFormat::Json => {
            let json = report.to_json().context("serializing report")?;
            println!("{json}");
        }
    }

    Ok(report.exit_code())
}

/// Load both inputs and validate them, without printing anything.
pub fn build_report(args: &CheckArgs, config: &MatchConfig, root: &Path) -> Result<Report> {
    let schema_path = resolve_path(&args.schema, root);
    let bindings_path = resolve_path(&args.bindings, root);

    let doc = load_document(&schema_path).context("loading API schema")?;
    let schema = build_schema_model(&doc, config);

    let source = std::fs::read_to_string(&bindings_path)
        .with_context(|| format!("reading binding source {}", bindings_path.display()))?;
    let bindings = BindingModel::from_source(&source);

    let results = cross_validate(&schema, &bindings, config);
    Ok(Report::new(&schema, &bindings, &results).with_origins(
        args.schema.display().to_string(),
        args.bindings.display().to_string(),
    ))
}
