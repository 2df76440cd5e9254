//! # bindsync-cli — Binding Drift Check
//!
//! Provides the `bindsync` command-line interface.
//!
//! ## Subcommands
//!
//! - `bindsync check` — Compare the API schema with the binding source and
//!   report missing and extra registrations.
//!
//! ## Exit status
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Every bindable schema entry is registered.      |
//! | 1    | At least one schema entry has no registration.  |
//! | 2    | An input could not be read or parsed.           |
//!
//! ```bash
//! bindsync check
//! bindsync -v check --schema docs/api-definition.yaml --bindings src/tcScriptHost.cpp
//! bindsync --config bindsync.yaml check --format json
//! ```

pub mod check;

use std::path::{Path, PathBuf};

/// Schema location used when `--schema` is not given.
pub const DEFAULT_SCHEMA_PATH: &str = "docs/api-definition.yaml";

/// Binding source location used when `--bindings` is not given.
pub const DEFAULT_BINDINGS_PATH: &str = "src/tcScriptHost.cpp";

/// Exit status for unreadable or unparseable inputs.
pub const EXIT_INPUT_ERROR: u8 = 2;

/// Locate an input named on the command line.
///
/// `--schema`, `--bindings` and `--config` values are looked up under the
/// project root first. A relative path with nothing under the root is kept
/// as typed, so a read failure names the path the user wrote.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_relative() {
        let under_root = root.join(path);
        if under_root.exists() {
            return under_root;
        }
    }
    path.to_path_buf()
}

/// Walk up from `start` to the nearest directory that contains the default
/// schema file.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DEFAULT_SCHEMA_PATH).is_file())
        .map(Path::to_path_buf)
}
