//! JSON rule documents.
//!
//! A rule document maps field names to rule objects:
//!
//! ```json
//! {
//!   "email":    { "preset": "email" },
//!   "nickname": { "required": "Pick a nickname", "minLength": 2,
//!                 "maxLength": { "value": 30, "message": "Too long" } },
//!   "bpm":      { "min": 40, "max": { "value": 240 } }
//! }
//! ```
//!
//! Custom predicates cannot be expressed in JSON; attach them in code.

use serde::Deserialize;

use crate::engine::RuleSet;
use crate::error::{Result, RuleError};
use crate::presets;
use crate::rule::{Requirement, Threshold, ValidationRule};

/// `required` as a flag or as the message to report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RequiredSpec {
    /// `true` / `false`.
    Flag(bool),
    /// Required, reporting this message.
    Message(String),
}

/// A threshold written either as a bare value or as `{ value, message }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec<T> {
    /// Bare value, default message.
    Bare(T),
    /// Value with an optional message.
    Full {
        /// The bound.
        value: T,
        /// Message override.
        #[serde(default)]
        message: Option<String>,
    },
}

impl<T> ThresholdSpec<T> {
    fn into_parts(self) -> (T, Option<String>) {
        match self {
            Self::Bare(value) => (value, None),
            Self::Full { value, message } => (value, message),
        }
    }
}

impl<T> From<ThresholdSpec<T>> for Threshold<T> {
    fn from(spec: ThresholdSpec<T>) -> Self {
        let (value, message) = spec.into_parts();
        Self { value, message }
    }
}

/// One field's rule as written in a rule document.
///
/// When `preset` is given the preset is the starting point and the other
/// keys override its constraints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSpec {
    /// Name of a preset from [`crate::presets`].
    #[serde(default)]
    pub preset: Option<String>,
    /// Required flag or message.
    #[serde(default)]
    pub required: Option<RequiredSpec>,
    /// Minimum text length.
    #[serde(default)]
    pub min_length: Option<ThresholdSpec<usize>>,
    /// Maximum text length.
    #[serde(default)]
    pub max_length: Option<ThresholdSpec<usize>>,
    /// Regular expression source.
    #[serde(default)]
    pub pattern: Option<ThresholdSpec<String>>,
    /// Lower numeric bound.
    #[serde(default)]
    pub min: Option<ThresholdSpec<f64>>,
    /// Upper numeric bound.
    #[serde(default)]
    pub max: Option<ThresholdSpec<f64>>,
}

impl TryFrom<RuleSpec> for ValidationRule {
    type Error = RuleError;

    fn try_from(spec: RuleSpec) -> Result<Self> {
        let mut rule = match &spec.preset {
            Some(name) => presets::by_name(name)?,
            None => Self::new(),
        };

        match spec.required {
            Some(RequiredSpec::Flag(true)) => rule.requirement = Requirement::Required,
            Some(RequiredSpec::Flag(false)) => rule.requirement = Requirement::Optional,
            Some(RequiredSpec::Message(message)) => {
                rule.requirement = Requirement::RequiredWithMessage(message);
            }
            None => {}
        }

        if let Some(min_length) = spec.min_length {
            rule.min_length = Some(min_length.into());
        }
        if let Some(max_length) = spec.max_length {
            rule.max_length = Some(max_length.into());
        }
        if let Some(pattern) = spec.pattern {
            let (source, message) = pattern.into_parts();
            rule = rule.pattern_str(&source, message)?;
        }
        if let Some(min) = spec.min {
            rule.min = Some(min.into());
        }
        if let Some(max) = spec.max {
            rule.max = Some(max.into());
        }

        check_bounds(&rule)?;
        Ok(rule)
    }
}

fn check_bounds(rule: &ValidationRule) -> Result<()> {
    match (&rule.min_length, &rule.max_length) {
        (Some(min), Some(max)) if min.value > max.value => {
            return Err(RuleError::InconsistentBounds(format!(
                "minLength {} exceeds maxLength {}",
                min.value, max.value
            )));
        }
        _ => {}
    }
    match (&rule.min, &rule.max) {
        (Some(min), Some(max)) if min.value > max.value => {
            return Err(RuleError::InconsistentBounds(format!(
                "min {} exceeds max {}",
                min.value, max.value
            )));
        }
        _ => {}
    }
    Ok(())
}

/// Parses a JSON rule document into a rule set keyed by field name.
pub fn parse_rule_set(json: &str) -> Result<RuleSet<String>> {
    let specs: std::collections::BTreeMap<String, RuleSpec> = serde_json::from_str(json)?;

    specs
        .into_iter()
        .map(|(field, spec)| match ValidationRule::try_from(spec) {
            Ok(rule) => Ok((field, rule)),
            Err(source) => Err(RuleError::InvalidRule {
                field,
                source: Box::new(source),
            }),
        })
        .collect()
}
