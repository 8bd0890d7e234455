//! # resonance-validate
//!
//! Declarative field validation for the Resonance web client's forms.
//!
//! This crate provides:
//! - Per-field rules (required, length, pattern, numeric range, custom)
//! - Field and whole-form evaluation with a fixed rule precedence
//! - Presets for the fields the client's pages share
//! - Standalone checks: email shape, password strength, HTML escaping,
//!   error formatting
//! - JSON rule documents
//!
//! ## Quick Start
//!
//! ```rust
//! use resonance_validate::{presets, validate_form, FieldValues, RuleSet, ValidationRule};
//! use serde_json::json;
//!
//! let rules: RuleSet<&str> = [
//!     ("email", presets::email()),
//!     ("displayName", ValidationRule::new().required().max_length(40)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let data: FieldValues<&str> = [
//!     ("email", json!("bad")),
//!     ("displayName", json!("DJ Nova")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let result = validate_form(&data, &rules);
//! assert!(!result.is_valid);
//! assert_eq!(
//!     result.errors.get(&"email"),
//!     Some("Please enter a valid email address"),
//! );
//! ```
//!
//! ## Rule precedence
//!
//! A field reports at most one message, from the first failing step:
//!
//! 1. `required`
//! 2. empty or falsy optional values pass without further checks
//! 3. `min_length`, 4. `max_length`, 5. `pattern`, 6. `min`, 7. `max`
//! 8. `custom`
//!
//! ```rust
//! use resonance_validate::{validate_field, ValidationRule};
//! use serde_json::json;
//!
//! let rule = ValidationRule::new().required().min_length_msg(5, "short");
//! assert_eq!(
//!     validate_field("name", &json!(""), &rule).as_deref(),
//!     Some("name is required"),
//! );
//! ```

mod checks;
mod document;
mod engine;
mod error;
pub mod presets;
mod rule;
pub mod value;

pub use checks::{
    format_validation_errors, is_valid_email, sanitize_input, validate_password_strength,
    PasswordStrength, PasswordStrengthReport, PASSWORD_SPECIAL_CHARS,
};
pub use document::{parse_rule_set, RequiredSpec, RuleSpec, ThresholdSpec};
pub use engine::{validate_field, validate_form, FieldKey, FieldValues, RuleSet, ValidationResult};
pub use error::{Result, RuleError, ValidationErrors};
pub use rule::{CustomCheck, CustomOutcome, PatternRule, Requirement, Threshold, ValidationRule};
