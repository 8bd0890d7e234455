//! Rule presets for the fields that recur across the client's forms:
//! sign-in, sign-up, profile and playlist editing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::checks::EMAIL_RE;
use crate::error::{Result, RuleError};
use crate::rule::ValidationRule;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username pattern compiles"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("url pattern compiles"));

// 10 to 12 digits, each optionally preceded by spaces, dots, dashes or
// parentheses, with an optional leading `+`.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(?:[\s.()-]*\d){10,12}[\s.()-]*$").expect("phone pattern compiles")
});

/// Required, shaped like `local@domain.tld`.
pub fn email() -> ValidationRule {
    ValidationRule::new()
        .required()
        .pattern(
            EMAIL_RE.clone(),
            Some("Please enter a valid email address".to_string()),
        )
}

/// Required, at least 8 characters.
pub fn password() -> ValidationRule {
    ValidationRule::new()
        .required()
        .min_length_msg(8, "Password must be at least 8 characters long")
}

/// Required, equal to `original`.
///
/// The comparison value is captured now; later edits to the original
/// password field are not seen by this rule.
pub fn confirm_password(original: impl Into<String>) -> ValidationRule {
    let original = original.into();
    ValidationRule::new()
        .required_msg("Please confirm your password")
        .custom(move |value: &Value| {
            if value.as_str() == Some(original.as_str()) {
                None
            } else {
                Some("Passwords do not match".to_string())
            }
        })
}

/// Required, 3 to 20 characters of letters, digits, `_` or `-`.
pub fn username() -> ValidationRule {
    ValidationRule::new()
        .required()
        .min_length_msg(3, "Username must be at least 3 characters long")
        .max_length_msg(20, "Username must be no more than 20 characters long")
        .pattern(
            USERNAME_RE.clone(),
            Some("Username can only contain letters, numbers, underscores, and hyphens".to_string()),
        )
}

/// Required, between 13 and 120 inclusive.
pub fn age() -> ValidationRule {
    ValidationRule::new()
        .required()
        .min_msg(13.0, "You must be at least 13 years old")
        .max_msg(120.0, "Please enter a valid age")
}

/// Optional, must start with `http://` or `https://`.
pub fn url() -> ValidationRule {
    ValidationRule::new().pattern(
        URL_RE.clone(),
        Some("Please enter a valid URL starting with http:// or https://".to_string()),
    )
}

/// Optional, 10 to 12 digits with free-form separators.
pub fn phone() -> ValidationRule {
    ValidationRule::new().pattern(
        PHONE_RE.clone(),
        Some("Please enter a valid phone number".to_string()),
    )
}

/// Looks a preset up by name.
///
/// `confirmPassword` is not available here since it needs the original
/// password; use [`confirm_password`] directly.
pub fn by_name(name: &str) -> Result<ValidationRule> {
    match name {
        "email" => Ok(email()),
        "password" => Ok(password()),
        "username" => Ok(username()),
        "age" => Ok(age()),
        "url" => Ok(url()),
        "phone" => Ok(phone()),
        other => Err(RuleError::UnknownPreset(other.to_string())),
    }
}
