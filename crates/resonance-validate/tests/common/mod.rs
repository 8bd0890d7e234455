#![allow(dead_code)]

use resonance_validate::{FieldValues, RuleSet, ValidationRule};
use serde_json::Value;

pub fn values(pairs: &[(&'static str, Value)]) -> FieldValues<&'static str> {
    pairs.iter().cloned().collect()
}

pub fn rules(pairs: Vec<(&'static str, ValidationRule)>) -> RuleSet<&'static str> {
    pairs.into_iter().collect()
}

/// A rule exercising every constraint, with distinguishable messages.
pub fn every_constraint() -> ValidationRule {
    ValidationRule::new()
        .required_msg("required")
        .min_length_msg(2, "min_length")
        .max_length_msg(6, "max_length")
        .pattern_str(r"^[0-9a-z]+$", Some("pattern".to_string()))
        .unwrap_or_else(|e| panic!("Failed to compile pattern: {e}"))
        .min_msg(10.0, "min")
        .max_msg(5000.0, "max")
        .custom(|v: &Value| v.as_str() != Some("666"))
}
