//! # Schema Loading
//!
//! Reads the schema document from disk or from memory. Failure here is
//! the input-unavailable case: the run cannot proceed without a schema,
//! so errors propagate to the caller instead of being skipped.

use std::path::Path;

use thiserror::Error;

use crate::document::ApiDocument;

/// Error reading or parsing the schema document as a whole.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("cannot read schema '{path}': {reason}")]
    Read {
        /// Path of the schema file.
        path: String,
        /// Underlying IO failure.
        reason: String,
    },

    /// The schema text is not a YAML mapping of the expected shape.
    #[error("invalid schema '{origin}': {reason}")]
    Parse {
        /// Path or label of the schema source.
        origin: String,
        /// Parser message.
        reason: String,
    },
}

/// Parse schema text. `origin` labels the source in error messages.
///
/// An empty document parses to an empty [`ApiDocument`].
pub fn parse_document(text: &str, origin: &str) -> Result<ApiDocument, SchemaLoadError> {
    if text.trim().is_empty() {
        return Ok(ApiDocument::default());
    }
    serde_yaml::from_str(text).map_err(|e| SchemaLoadError::Parse {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Read and parse a schema file.
pub fn load_document(path: &Path) -> Result<ApiDocument, SchemaLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| SchemaLoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let doc = parse_document(&text, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        categories = doc.categories.len(),
        types = doc.types.len(),
        "loaded schema document"
    );
    Ok(doc)
}
