//! # resonance-forms
//!
//! Form state for the Resonance web client: current values, per-field
//! errors, touched flags and a submit gate.
//!
//! A [`FormController`] owns one form's [`FormState`]. Pages forward input
//! events to it (`handle_change`, `handle_blur`, `handle_submit`) and render
//! from [`FormController::state`] or a [`FormController::subscribe`]
//! receiver. Validation uses [`resonance_validate`] rules; the submit action
//! is an async callback that only runs when every rule passes.
//!
//! ## Example
//!
//! ```rust
//! use resonance_forms::{FormConfig, FormController, SubmitOutcome};
//! use resonance_validate::presets;
//! use serde_json::json;
//!
//! let config = FormConfig::default();
//! let form = FormController::builder(
//!     [("email", json!("")), ("password", json!(""))].into_iter().collect(),
//!     |values| async move {
//!         // hand the credentials to the API client here
//!         assert_eq!(values["email"], json!("dj@example.com"));
//!         Ok::<(), String>(())
//!     },
//! )
//! .config(&config)
//! .rule("email", presets::email())
//! .rule("password", presets::password())
//! .build();
//!
//! form.handle_blur("email");
//! assert_eq!(form.state().errors.get(&"email"), Some("email is required"));
//!
//! form.handle_change("email", json!("dj@example.com"));
//! form.handle_change("password", json!("correct horse"));
//! assert!(form.state().is_valid);
//!
//! let outcome = futures::executor::block_on(form.handle_submit());
//! assert_eq!(outcome, Ok(SubmitOutcome::Submitted));
//! ```

mod config;
mod controller;
mod error;
mod state;

pub use config::FormConfig;
pub use controller::{FormBuilder, FormController, SubmitHandler, SubmitOutcome};
pub use error::{FormError, Result};
pub use state::FormState;

pub use resonance_validate::{FieldKey, FieldValues, RuleSet, ValidationErrors, ValidationRule};
