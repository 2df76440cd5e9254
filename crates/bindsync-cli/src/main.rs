//! # bindsync CLI entry point
//!
//! Parses command-line arguments, sets up logging on stderr and dispatches
//! to subcommand handlers. Handler errors are input failures and exit with
//! status 2; drift is reported through the handler's own exit code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bindsync_cli::check::{load_config, run_check, CheckArgs};
use bindsync_cli::{find_project_root, EXIT_INPUT_ERROR};

/// Script binding drift checker.
///
/// Compares the functions and methods declared in the script API schema
/// with the ones the host actually registers with the AngelScript engine.
#[derive(Parser, Debug)]
#[command(name = "bindsync", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Matching tables (YAML). Defaults to the built-in tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project root that relative input paths resolve against.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the binding source against the API schema.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("bindsync CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_INPUT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let root = resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved project root");

    let config = load_config(cli.config.as_deref(), &root)?;

    match &cli.command {
        Commands::Check(args) => run_check(args, &config, &root),
    }
}

fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project_root(&cwd).unwrap_or_else(|| {
        tracing::debug!("no project root found above the current directory; using it as root");
        cwd
    })
}
