//! Error types for rule construction and the validation error map.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors raised while building rules.
///
/// Validation failures are never reported through this type; they are
/// collected in [`ValidationErrors`].
#[derive(Debug, Error)]
pub enum RuleError {
    /// A `pattern` constraint did not compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending regular expression.
        pattern: String,
        /// The compile error reported by `regex`.
        #[source]
        source: regex::Error,
    },

    /// A rule document named a preset that does not exist.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A rule's bounds contradict each other.
    #[error("inconsistent bounds: {0}")]
    InconsistentBounds(String),

    /// A rule in a rule document could not be built.
    #[error("invalid rule for field {field}: {source}")]
    InvalidRule {
        /// The field the rule belongs to.
        field: String,
        /// What went wrong.
        #[source]
        source: Box<RuleError>,
    },

    /// A rule document could not be parsed.
    #[error("failed to parse rule document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for rule construction.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Error messages keyed by field, at most one message per field.
///
/// A field is present only while its current value fails a rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors<K: Ord> {
    errors: BTreeMap<K, String>,
}

impl<K: Ord> Default for ValidationErrors<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> ValidationErrors<K> {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Sets the message for a field, replacing any previous one.
    pub fn insert(&mut self, field: K, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Clears the message for a field.
    pub fn remove(&mut self, field: &K) -> Option<String> {
        self.errors.remove(field)
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message for a specific field.
    pub fn get(&self, field: &K) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field currently has an error.
    pub fn contains(&self, field: &K) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterates over the messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().map(String::as_str)
    }
}

impl<K: Ord> FromIterator<(K, String)> for ValidationErrors<K> {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord> IntoIterator for ValidationErrors<K> {
    type Item = (K, String);
    type IntoIter = std::collections::btree_map::IntoIter<K, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<K: Ord> fmt::Display for ValidationErrors<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages().enumerate() {
            if i > 0 {
                f.write_str(". ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl<K: Ord + fmt::Debug> std::error::Error for ValidationErrors<K> {}
