//! # Error Types
//!
//! Errors raised while loading configuration. Extraction and model
//! building never fail on individual entries; malformed declarations are
//! skipped at the point of extraction, so the only hard failures in the
//! core are about the inputs as a whole.

use thiserror::Error;

/// Error loading or parsing a [`MatchConfig`](crate::MatchConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {reason}")]
    Read {
        /// Path of the configuration file.
        path: String,
        /// Underlying IO failure.
        reason: String,
    },

    /// The configuration document is not valid YAML or has unknown keys.
    #[error("invalid config '{origin}': {reason}")]
    Parse {
        /// Path or label of the configuration source.
        origin: String,
        /// Parser message.
        reason: String,
    },
}
