#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use resonance_forms::{FieldValues, FormController};
use serde_json::Value;

/// Records every payload handed to the submit callback.
#[derive(Clone, Default)]
pub struct SubmitLog {
    calls: Arc<Mutex<Vec<FieldValues<&'static str>>>>,
}

impl SubmitLog {
    pub fn record(&self, values: FieldValues<&'static str>) {
        self.calls.lock().unwrap().push(values);
    }

    pub fn calls(&self) -> Vec<FieldValues<&'static str>> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn values(pairs: &[(&'static str, Value)]) -> FieldValues<&'static str> {
    pairs.iter().cloned().collect()
}

/// A controller whose submit callback succeeds and records its payload.
pub fn recording_form(
    initial: &[(&'static str, Value)],
) -> (
    resonance_forms::FormBuilder<&'static str, String>,
    SubmitLog,
) {
    let log = SubmitLog::default();
    let sink = log.clone();
    let builder = FormController::builder(values(initial), move |submitted| {
        let sink = sink.clone();
        async move {
            sink.record(submitted);
            Ok(())
        }
    });
    (builder, log)
}
