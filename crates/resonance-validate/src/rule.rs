//! Declarative per-field rules.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, RuleError};

/// Whether a field must hold a non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Requirement {
    /// Empty values pass and skip every other constraint.
    #[default]
    Optional,
    /// Empty values fail with `"<field> is required"`.
    Required,
    /// Empty values fail with the given message.
    RequiredWithMessage(String),
}

impl Requirement {
    /// Returns whether the field is required.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Optional)
    }
}

/// A numeric threshold with an optional message override.
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold<T> {
    /// The bound.
    pub value: T,
    /// Message reported instead of the default one.
    pub message: Option<String>,
}

impl<T> Threshold<T> {
    /// Creates a threshold using the default message.
    pub fn new(value: T) -> Self {
        Self {
            value,
            message: None,
        }
    }

    /// Creates a threshold with a custom message.
    pub fn with_message(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: Some(message.into()),
        }
    }
}

/// A regular expression constraint.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The expression the text form must match.
    pub regex: Regex,
    /// Message reported instead of the default one.
    pub message: Option<String>,
}

/// What a custom predicate decided about a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    /// The value is acceptable.
    Pass,
    /// The value is rejected with `"<field> is invalid"`.
    Fail,
    /// The value is rejected with this message.
    Message(String),
}

impl From<bool> for CustomOutcome {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl From<String> for CustomOutcome {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for CustomOutcome {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<Option<String>> for CustomOutcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::Pass, Self::Message)
    }
}

impl From<std::result::Result<(), String>> for CustomOutcome {
    fn from(result: std::result::Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::Message(message),
        }
    }
}

/// A boxed custom predicate.
pub type CustomCheck = Arc<dyn Fn(&Value) -> CustomOutcome + Send + Sync>;

/// The set of constraints attached to one field.
///
/// Constraints are evaluated in a fixed order regardless of the order in
/// which they were attached; see [`crate::validate_field`].
///
/// # Example
///
/// ```rust
/// use resonance_validate::ValidationRule;
///
/// let rule = ValidationRule::new()
///     .required()
///     .min_length(3)
///     .max_length_msg(20, "Too long");
/// assert!(rule.requirement.is_required());
/// ```
#[derive(Clone, Default)]
pub struct ValidationRule {
    /// Required / optional.
    pub requirement: Requirement,
    /// Minimum length of the text form.
    pub min_length: Option<Threshold<usize>>,
    /// Maximum length of the text form.
    pub max_length: Option<Threshold<usize>>,
    /// Pattern the text form must match.
    pub pattern: Option<PatternRule>,
    /// Lower numeric bound.
    pub min: Option<Threshold<f64>>,
    /// Upper numeric bound.
    pub max: Option<Threshold<f64>>,
    /// Arbitrary predicate, evaluated last.
    pub custom: Option<CustomCheck>,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("requirement", &self.requirement)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(|p| p.regex.as_str()))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ValidationRule {
    /// Creates a rule with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Makes the field required with a custom message.
    #[must_use]
    pub fn required_msg(mut self, message: impl Into<String>) -> Self {
        self.requirement = Requirement::RequiredWithMessage(message.into());
        self
    }

    /// Sets a minimum length.
    #[must_use]
    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(Threshold::new(value));
        self
    }

    /// Sets a minimum length with a custom message.
    #[must_use]
    pub fn min_length_msg(mut self, value: usize, message: impl Into<String>) -> Self {
        self.min_length = Some(Threshold::with_message(value, message));
        self
    }

    /// Sets a maximum length.
    #[must_use]
    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(Threshold::new(value));
        self
    }

    /// Sets a maximum length with a custom message.
    #[must_use]
    pub fn max_length_msg(mut self, value: usize, message: impl Into<String>) -> Self {
        self.max_length = Some(Threshold::with_message(value, message));
        self
    }

    /// Attaches an already compiled pattern.
    #[must_use]
    pub fn pattern(mut self, regex: Regex, message: Option<String>) -> Self {
        self.pattern = Some(PatternRule { regex, message });
        self
    }

    /// Compiles and attaches a pattern.
    pub fn pattern_str(self, pattern: &str, message: Option<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.pattern(regex, message))
    }

    /// Sets a lower numeric bound.
    #[must_use]
    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(Threshold::new(value));
        self
    }

    /// Sets a lower numeric bound with a custom message.
    #[must_use]
    pub fn min_msg(mut self, value: f64, message: impl Into<String>) -> Self {
        self.min = Some(Threshold::with_message(value, message));
        self
    }

    /// Sets an upper numeric bound.
    #[must_use]
    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(Threshold::new(value));
        self
    }

    /// Sets an upper numeric bound with a custom message.
    #[must_use]
    pub fn max_msg(mut self, value: f64, message: impl Into<String>) -> Self {
        self.max = Some(Threshold::with_message(value, message));
        self
    }

    /// Attaches a custom predicate.
    ///
    /// The predicate may return anything convertible into a
    /// [`CustomOutcome`]: `bool`, a message, `Option<String>` or
    /// `Result<(), String>`.
    #[must_use]
    pub fn custom<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<CustomOutcome>,
    {
        self.custom = Some(Arc::new(move |value| check(value).into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_sets_constraints() {
        let rule = ValidationRule::new()
            .required_msg("Name please")
            .min_length(2)
            .max_length_msg(10, "Too long")
            .min(1.0)
            .max_msg(5.0, "Too big");

        assert_eq!(
            rule.requirement,
            Requirement::RequiredWithMessage("Name please".to_string())
        );
        assert_eq!(rule.min_length, Some(Threshold::new(2)));
        assert_eq!(
            rule.max_length,
            Some(Threshold::with_message(10, "Too long"))
        );
        assert_eq!(rule.min.as_ref().map(|t| t.value), Some(1.0));
        assert_eq!(
            rule.max.as_ref().and_then(|t| t.message.as_deref()),
            Some("Too big")
        );
        assert!(rule.custom.is_none());
    }

    #[test]
    fn test_pattern_str_rejects_bad_regex() {
        let err = ValidationRule::new().pattern_str("(unclosed", None).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_custom_outcome_conversions() {
        assert_eq!(CustomOutcome::from(true), CustomOutcome::Pass);
        assert_eq!(CustomOutcome::from(false), CustomOutcome::Fail);
        assert_eq!(
            CustomOutcome::from("nope"),
            CustomOutcome::Message("nope".to_string())
        );
        assert_eq!(CustomOutcome::from(None::<String>), CustomOutcome::Pass);
        assert_eq!(
            CustomOutcome::from(Err::<(), _>("bad".to_string())),
            CustomOutcome::Message("bad".to_string())
        );
    }

    #[test]
    fn test_custom_predicate_receives_raw_value() {
        let rule = ValidationRule::new().custom(|v: &Value| v == &json!(7));
        let check = rule.custom.unwrap();
        assert_eq!(check(&json!(7)), CustomOutcome::Pass);
        assert_eq!(check(&json!("7")), CustomOutcome::Fail);
    }

    #[test]
    fn test_debug_hides_closure() {
        let rule = ValidationRule::new().custom(|_: &Value| true);
        let debug = format!("{rule:?}");
        assert!(debug.contains("custom: true"));
    }
}
