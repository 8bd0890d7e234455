//! Field and form evaluation.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::ValidationErrors;
use crate::rule::{CustomOutcome, Requirement, ValidationRule};
use crate::value;

/// Types usable as field names.
///
/// The `Display` form is the name used in default messages.
pub trait FieldKey: Clone + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> FieldKey for T where T: Clone + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Current values keyed by field.
pub type FieldValues<K> = BTreeMap<K, Value>;

/// Rules keyed by field. Fields without an entry are never checked.
pub type RuleSet<K> = BTreeMap<K, ValidationRule>;

/// Outcome of validating a whole form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult<K: Ord> {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// One message per failing field.
    pub errors: ValidationErrors<K>,
}

impl<K: Ord> ValidationResult<K> {
    /// Converts into `Ok(())` or `Err(errors)`.
    pub fn into_result(self) -> Result<(), ValidationErrors<K>> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validates one value against one rule.
///
/// Returns the first failing constraint's message, checking in this order:
/// required, then (for non-empty values) min length, max length, pattern,
/// min, max, custom. Empty or falsy values of optional fields pass without
/// further checks.
pub fn validate_field(name: &str, value: &Value, rule: &ValidationRule) -> Option<String> {
    match &rule.requirement {
        Requirement::Optional => {
            if value::is_falsy(value) {
                return None;
            }
        }
        Requirement::Required if value::is_empty(value) => {
            return Some(format!("{name} is required"));
        }
        Requirement::RequiredWithMessage(message) if value::is_empty(value) => {
            return Some(message.clone());
        }
        Requirement::Required | Requirement::RequiredWithMessage(_) => {}
    }

    if let Some(min_length) = rule
        .min_length
        .as_ref()
        .filter(|min_length| value::text_len(value) < min_length.value)
    {
        return Some(min_length.message.clone().unwrap_or_else(|| {
            format!("{name} must be at least {} characters", min_length.value)
        }));
    }

    if let Some(max_length) = rule
        .max_length
        .as_ref()
        .filter(|max_length| value::text_len(value) > max_length.value)
    {
        return Some(max_length.message.clone().unwrap_or_else(|| {
            format!("{name} must be no more than {} characters", max_length.value)
        }));
    }

    if let Some(pattern) = rule
        .pattern
        .as_ref()
        .filter(|pattern| !pattern.regex.is_match(&value::to_text(value)))
    {
        return Some(
            pattern
                .message
                .clone()
                .unwrap_or_else(|| format!("{name} format is invalid")),
        );
    }

    if rule.min.is_some() || rule.max.is_some() {
        let number = value::to_number(value);

        if let Some(min) = rule.min.as_ref().filter(|min| number < min.value) {
            return Some(
                min.message
                    .clone()
                    .unwrap_or_else(|| format!("{name} must be at least {}", min.value)),
            );
        }

        if let Some(max) = rule.max.as_ref().filter(|max| number > max.value) {
            return Some(
                max.message
                    .clone()
                    .unwrap_or_else(|| format!("{name} must be no more than {}", max.value)),
            );
        }
    }

    if let Some(custom) = &rule.custom {
        match custom(value) {
            CustomOutcome::Pass => {}
            CustomOutcome::Fail => return Some(format!("{name} is invalid")),
            CustomOutcome::Message(message) => return Some(message),
        }
    }

    None
}

/// Validates every field that has a rule.
///
/// Fields present in `data` but absent from `rules` are ignored; fields
/// with a rule but no value are checked as `null`.
pub fn validate_form<K: FieldKey>(data: &FieldValues<K>, rules: &RuleSet<K>) -> ValidationResult<K> {
    let errors: ValidationErrors<K> = rules
        .iter()
        .filter_map(|(field, rule)| {
            let value = data.get(field).unwrap_or(&Value::Null);
            validate_field(&field.to_string(), value, rule).map(|message| (field.clone(), message))
        })
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
