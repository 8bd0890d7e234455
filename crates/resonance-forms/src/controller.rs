//! The form controller: change/blur/submit handling over a shared state.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use resonance_validate::{
    validate_field, validate_form, FieldKey, FieldValues, RuleSet, ValidationErrors,
    ValidationResult, ValidationRule,
};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::state::FormState;

/// A boxed async submit callback.
pub type SubmitHandler<K, E> =
    Arc<dyn Fn(FieldValues<K>) -> BoxFuture<'static, Result<(), E>> + Send + Sync>;

/// What `handle_submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was valid and the submit callback completed successfully.
    Submitted,
    /// The form was invalid; the submit callback was not called.
    Blocked,
}

impl SubmitOutcome {
    /// Returns whether the callback ran and succeeded.
    pub const fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Builder for [`FormController`].
pub struct FormBuilder<K: FieldKey, E> {
    initial_values: FieldValues<K>,
    rules: RuleSet<K>,
    config: FormConfig,
    on_submit: SubmitHandler<K, E>,
}

impl<K: FieldKey, E: Send + 'static> FormBuilder<K, E> {
    /// Attaches a rule to a field, replacing any previous one.
    #[must_use]
    pub fn rule(mut self, field: K, rule: ValidationRule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    /// Attaches every rule of a rule set.
    #[must_use]
    pub fn rules(mut self, rules: RuleSet<K>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Copies both validation toggles from a configuration.
    #[must_use]
    pub fn config(mut self, config: &FormConfig) -> Self {
        self.config = *config;
        self
    }

    /// Enables or disables validation on change.
    #[must_use]
    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.config.validate_on_change = enabled;
        self
    }

    /// Enables or disables validation on blur.
    #[must_use]
    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.config.validate_on_blur = enabled;
        self
    }

    /// Builds the controller.
    pub fn build(self) -> FormController<K, E> {
        let (state, _) = watch::channel(FormState::new(self.initial_values.clone()));
        FormController {
            config: self.config,
            initial_values: Arc::new(self.initial_values),
            rules: Arc::new(self.rules),
            on_submit: self.on_submit,
            state: Arc::new(state),
        }
    }
}

/// Drives one form through edit, validate and submit.
///
/// The state lives in a `watch` channel: every operation that mutates it
/// notifies subscribers, which is how a page learns it must re-render.
/// Clones share the same state.
pub struct FormController<K: FieldKey, E> {
    config: FormConfig,
    initial_values: Arc<FieldValues<K>>,
    rules: Arc<RuleSet<K>>,
    on_submit: SubmitHandler<K, E>,
    state: Arc<watch::Sender<FormState<K>>>,
}

impl<K: FieldKey, E> Clone for FormController<K, E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            initial_values: Arc::clone(&self.initial_values),
            rules: Arc::clone(&self.rules),
            on_submit: Arc::clone(&self.on_submit),
            state: Arc::clone(&self.state),
        }
    }
}

impl<K: FieldKey, E> std::fmt::Debug for FormController<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("config", &self.config)
            .field("fields", &self.initial_values.keys().collect::<Vec<_>>())
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K: FieldKey, E: Send + 'static> FormController<K, E> {
    /// Starts building a controller.
    ///
    /// `on_submit` receives the current values once the whole form is
    /// valid. Its error, if any, is returned from
    /// [`handle_submit`](Self::handle_submit) unchanged.
    pub fn builder<F, Fut>(initial_values: FieldValues<K>, on_submit: F) -> FormBuilder<K, E>
    where
        F: Fn(FieldValues<K>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        FormBuilder {
            initial_values,
            rules: RuleSet::new(),
            config: FormConfig::default(),
            on_submit: Arc::new(move |values| on_submit(values).boxed()),
        }
    }

    /// Returns the configuration in effect.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FormState<K> {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FormState<K>> {
        self.state.subscribe()
    }

    /// Overwrites a field's value and, when enabled, re-validates it.
    pub fn handle_change(&self, field: K, value: Value) {
        let rule = self
            .config
            .validate_on_change
            .then(|| self.rules.get(&field))
            .flatten();

        self.state.send_modify(|state| {
            state.values.insert(field.clone(), value);
            if let Some(rule) = rule {
                revalidate(state, &field, rule);
            }
        });
    }

    /// Marks a field touched and, when enabled, validates its current value.
    pub fn handle_blur(&self, field: K) {
        let rule = self
            .config
            .validate_on_blur
            .then(|| self.rules.get(&field))
            .flatten();

        self.state.send_modify(|state| {
            state.touched.insert(field.clone(), true);
            if let Some(rule) = rule {
                revalidate(state, &field, rule);
            }
        });
    }

    /// Validates every rule-bearing field and stores the outcome.
    ///
    /// Values are read and errors written under one lock, so the stored
    /// errors always describe the values they were computed from.
    pub fn validate_all_fields(&self) -> ValidationResult<K> {
        let mut result = ValidationResult {
            is_valid: true,
            errors: ValidationErrors::new(),
        };
        self.state.send_modify(|state| {
            result = validate_all(state, &*self.rules);
        });

        debug!(
            valid = result.is_valid,
            errors = result.errors.len(),
            "Validated all fields"
        );
        result
    }

    /// Validates the form and, if valid, runs the submit callback.
    ///
    /// Every field is marked touched whether or not the form is valid.
    /// Validation, touching and taking the payload happen in one state
    /// update, so the callback only ever sees values that passed their
    /// rules. `is_submitting` is true exactly while the callback runs, and
    /// is cleared even if the returned future is dropped before completion.
    pub async fn handle_submit(&self) -> Result<SubmitOutcome, E> {
        let mut errors = 0;
        let mut accepted = None;

        self.state.send_modify(|state| {
            let result = validate_all(state, &*self.rules);
            for field in state.values.keys() {
                state.touched.insert(field.clone(), true);
            }
            if result.is_valid {
                state.is_submitting = true;
                accepted = Some(state.values.clone());
            } else {
                errors = result.errors.len();
            }
        });

        let Some(values) = accepted else {
            warn!(errors = errors, "Submission blocked by validation errors");
            return Ok(SubmitOutcome::Blocked);
        };
        let _submitting = SubmittingGuard::new(&self.state);

        info!(fields = values.len(), "Submitting form");
        match (self.on_submit)(values).await {
            Ok(()) => {
                info!("Form submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                warn!("Submit handler failed");
                Err(err)
            }
        }
    }

    /// Sets a value without validating it.
    pub fn set_field_value(&self, field: K, value: Value) {
        self.state.send_modify(|state| {
            state.values.insert(field, value);
        });
    }

    /// Sets an error message and marks the whole form invalid.
    ///
    /// The error stays until the next validation of that field or of the
    /// whole form.
    pub fn set_field_error(&self, field: K, message: impl Into<String>) {
        let message = message.into();
        self.state.send_modify(|state| {
            state.errors.insert(field, message);
            state.is_valid = false;
        });
    }

    /// Sets a field's touched flag.
    pub fn set_field_touched(&self, field: K, touched: bool) {
        self.state.send_modify(|state| {
            state.touched.insert(field, touched);
        });
    }

    /// Restores the initial values and clears errors and touched flags.
    pub fn reset_form(&self) {
        let initial = (*self.initial_values).clone();
        self.state.send_modify(|state| {
            *state = FormState::new(initial);
        });
        debug!("Form reset");
    }
}

fn validate_all<K: FieldKey>(state: &mut FormState<K>, rules: &RuleSet<K>) -> ValidationResult<K> {
    let result = validate_form(&state.values, rules);
    state.errors = result.errors.clone();
    state.is_valid = result.is_valid;
    result
}

fn revalidate<K: FieldKey>(state: &mut FormState<K>, field: &K, rule: &ValidationRule) {
    let value = state.values.get(field).unwrap_or(&Value::Null);
    match validate_field(&field.to_string(), value, rule) {
        Some(message) => {
            debug!(field = %field, error = %message, "Field invalid");
            state.errors.insert(field.clone(), message);
        }
        None => {
            debug!(field = %field, "Field valid");
            state.errors.remove(field);
        }
    }
    state.is_valid = state.errors.is_empty();
}

/// Clears `is_submitting` when dropped.
///
/// The flag is raised by the same update that accepts the payload.
struct SubmittingGuard<'a, K: FieldKey> {
    state: &'a watch::Sender<FormState<K>>,
}

impl<'a, K: FieldKey> SubmittingGuard<'a, K> {
    fn new(state: &'a watch::Sender<FormState<K>>) -> Self {
        Self { state }
    }
}

impl<K: FieldKey> Drop for SubmittingGuard<'_, K> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_submitting = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn controller() -> FormController<&'static str, String> {
        FormController::builder(
            [("name", json!("")), ("bio", json!(""))].into_iter().collect(),
            |_| async { Ok(()) },
        )
        .rule("name", ValidationRule::new().required())
        .build()
    }

    #[test]
    fn test_change_without_rule_only_sets_value() {
        let form = controller();
        form.handle_change("bio", json!("hello"));
        let state = form.state();
        assert_eq!(state.values["bio"], json!("hello"));
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_change_can_add_new_field() {
        let form = controller();
        form.handle_change("genre", json!("ambient"));
        let state = form.state();
        assert_eq!(state.values.len(), 3);
        assert_eq!(state.values["genre"], json!("ambient"));
    }

    #[test]
    fn test_blur_marks_touched_even_without_rule() {
        let form = controller();
        form.handle_blur("bio");
        assert!(form.state().is_touched(&"bio"));
        assert!(form.state().is_valid);
    }

    #[test]
    fn test_set_field_error_flips_validity() {
        let form = controller();
        form.set_field_error("bio", "Server says no");
        let state = form.state();
        assert!(!state.is_valid);
        assert_eq!(state.errors.get(&"bio"), Some("Server says no"));
    }

    #[test]
    fn test_validate_all_clears_manual_errors_on_unruled_fields() {
        let form = controller();
        form.set_field_error("bio", "Server says no");
        form.set_field_value("name", json!("Ada"));
        let result = form.validate_all_fields();
        assert!(result.is_valid);
        assert!(form.state().is_valid);
        assert!(form.state().errors.is_empty());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let form = controller();
        let mut rx = form.subscribe();
        assert!(!rx.has_changed().unwrap());
        form.handle_change("name", json!("Ada"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().values["name"], json!("Ada"));
    }

    #[test]
    fn test_clones_share_state() {
        let form = controller();
        let other = form.clone();
        other.set_field_touched("name", true);
        assert!(form.state().is_touched(&"name"));
    }

    #[test]
    fn test_submit_outcome_helpers() {
        assert!(SubmitOutcome::Submitted.is_submitted());
        assert!(!SubmitOutcome::Blocked.is_submitted());
    }
}
