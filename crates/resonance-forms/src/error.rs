//! Error types for form controllers.

use std::path::PathBuf;

use thiserror::Error;

/// Form controller setup errors.
///
/// Field validation failures are not errors; they are recorded in
/// [`crate::FormState::errors`]. Failures of the submit callback are
/// returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum FormError {
    /// The configuration document could not be parsed.
    #[error("invalid form configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for form setup.
pub type Result<T> = std::result::Result<T, FormError>;
