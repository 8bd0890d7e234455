//! Observable form state.

use std::collections::BTreeMap;

use resonance_validate::{FieldKey, FieldValues, ValidationErrors};
use serde::Serialize;

/// Everything a page needs to render a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState<K: FieldKey> {
    /// Current value of every field. Keys are only ever added.
    pub values: FieldValues<K>,
    /// Messages for the fields that currently fail their rule.
    pub errors: ValidationErrors<K>,
    /// Fields that were blurred or included in a submit attempt.
    pub touched: BTreeMap<K, bool>,
    /// True while the submit callback is running.
    pub is_submitting: bool,
    /// Whole-form validity, recomputed from `errors`.
    pub is_valid: bool,
}

impl<K: FieldKey> FormState<K> {
    /// Fresh state for the given initial values.
    pub fn new(values: FieldValues<K>) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
            touched: BTreeMap::new(),
            is_submitting: false,
            is_valid: true,
        }
    }

    /// Returns whether a field has been touched.
    pub fn is_touched(&self, field: &K) -> bool {
        self.touched.get(field).copied().unwrap_or(false)
    }

    /// Returns the message for a field, but only once it has been touched.
    ///
    /// Pages use this to avoid flagging fields the user has not reached yet.
    pub fn visible_error(&self, field: &K) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }
}
