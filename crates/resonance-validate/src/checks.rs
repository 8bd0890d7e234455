//! Standalone checks shared by the presets and the pages that show
//! validation feedback.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ValidationErrors;

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Characters accepted as the "special character" criterion.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Returns whether the string has the shape `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Coarse password strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    /// Four or more criteria are met.
    Strong,
    /// Two or three criteria are met.
    Medium,
    /// At most one criterion is met.
    Weak,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        })
    }
}

/// Result of [`validate_password_strength`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrengthReport {
    /// True only when every criterion is met.
    ///
    /// This is stricter than `strength == Strong`, which tolerates one
    /// unmet criterion.
    pub is_valid: bool,
    /// One message per unmet criterion.
    pub errors: Vec<String>,
    /// Strength label derived from the number of unmet criteria.
    pub strength: PasswordStrength,
}

/// Evaluates a password against five independent criteria: length of at
/// least 8, an uppercase letter, a lowercase letter, a digit and one of
/// [`PASSWORD_SPECIAL_CHARS`].
pub fn validate_password_strength(password: &str) -> PasswordStrengthReport {
    let criteria = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one number",
        ),
        (
            password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
            "Password must contain at least one special character (!@#$%^&*)",
        ),
    ];

    let errors: Vec<String> = criteria
        .iter()
        .filter(|(met, _)| !met)
        .map(|(_, message)| (*message).to_string())
        .collect();

    let strength = match errors.len() {
        0 | 1 => PasswordStrength::Strong,
        2 | 3 => PasswordStrength::Medium,
        _ => PasswordStrength::Weak,
    };

    PasswordStrengthReport {
        is_valid: errors.is_empty(),
        errors,
        strength,
    }
}

/// Escapes user-supplied text so it can be embedded in HTML without
/// introducing markup.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Joins every message into one sentence separated by `". "`.
pub fn format_validation_errors<K: Ord>(errors: &ValidationErrors<K>) -> String {
    errors.messages().collect::<Vec<_>>().join(". ")
}
