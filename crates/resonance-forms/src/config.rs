//! Form behaviour configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// When the controller re-validates individual fields.
///
/// Built once by the host (usually at startup) and handed to every
/// controller builder by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FormConfig {
    /// Re-validate a field each time its value changes.
    pub validate_on_change: bool,
    /// Re-validate a field when it loses focus.
    pub validate_on_blur: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
        }
    }
}

impl FormConfig {
    /// Creates the default configuration (both toggles on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `validate_on_change`.
    #[must_use]
    pub const fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// Sets `validate_on_blur`.
    #[must_use]
    pub const fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    /// Parses a JSON configuration. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
