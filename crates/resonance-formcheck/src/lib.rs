//! Checks a JSON form payload against a JSON rule document the way a page
//! would: every field is blurred in turn, then the form is submitted.
//!
//! Used to try out rule documents before wiring them into a page.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use resonance_forms::{FieldValues, FormConfig, FormController, FormState, RuleSet, SubmitOutcome};
use resonance_validate::{parse_rule_set, RuleError};
use serde_json::Value;
use tracing::debug;

/// Errors while loading the inputs.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rule document is invalid.
    #[error(transparent)]
    Rules(#[from] RuleError),

    /// The values document is not valid JSON.
    #[error("invalid values document: {0}")]
    Values(#[from] serde_json::Error),

    /// The values document is JSON but not an object.
    #[error("values document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Result type alias for loading inputs.
pub type Result<T> = std::result::Result<T, CheckError>;

/// What happened to the payload.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Whether the submit gate opened.
    pub outcome: SubmitOutcome,
    /// The form state after the submit attempt.
    pub state: FormState<String>,
    /// The values the submit callback received, if it ran.
    pub submitted: Option<FieldValues<String>>,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a rule document.
pub fn load_rules(path: &Path) -> Result<RuleSet<String>> {
    Ok(parse_rule_set(&read(path)?)?)
}

/// Parses a values document, which must be a JSON object.
pub fn parse_values(json: &str) -> Result<FieldValues<String>> {
    match serde_json::from_str(json)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Array(_) => Err(CheckError::NotAnObject("an array")),
        Value::String(_) => Err(CheckError::NotAnObject("a string")),
        Value::Number(_) => Err(CheckError::NotAnObject("a number")),
        Value::Bool(_) => Err(CheckError::NotAnObject("a boolean")),
        Value::Null => Err(CheckError::NotAnObject("null")),
    }
}

/// Loads a values document.
pub fn load_values(path: &Path) -> Result<FieldValues<String>> {
    parse_values(&read(path)?)
}

/// Runs the payload through a controller built from `rules` and `config`.
pub async fn check(
    rules: RuleSet<String>,
    values: FieldValues<String>,
    config: &FormConfig,
) -> CheckReport {
    let fields: Vec<String> = values
        .keys()
        .chain(rules.keys())
        .cloned()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let submitted = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&submitted);
    let form = FormController::builder(values, move |accepted| {
        let sink = Arc::clone(&sink);
        async move {
            store_accepted(&sink, accepted);
            Ok::<(), Infallible>(())
        }
    })
    .config(config)
    .rules(rules)
    .build();

    for field in fields {
        debug!(field = %field, "Blurring field");
        form.handle_blur(field);
    }

    let outcome = match form.handle_submit().await {
        Ok(outcome) => outcome,
        Err(never) => match never {},
    };

    let submitted = take_accepted(&submitted);
    CheckReport {
        outcome,
        state: form.state(),
        submitted,
    }
}

// A poisoned slot still holds the payload the callback accepted.
fn store_accepted<T>(slot: &Mutex<Option<T>>, accepted: T) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(accepted);
}

fn take_accepted<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}
