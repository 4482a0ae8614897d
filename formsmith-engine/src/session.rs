//! One filling session over a form snapshot.
//!
//! A session derives the form's validators and defaults once at
//! construction, then tracks values and per-field errors while the
//! respondent edits. `submit` runs every field's validation; success
//! records the response through the store and the session becomes
//! terminal until `restart`.

use indexmap::IndexMap;
use tracing::debug;

use formsmith_fields::{
    derive, render_control, toggle_choice, ControlDescription, DerivedSchema, FieldValue,
};

use crate::error::Result;
use crate::store::FormStore;
use crate::types::FormDefinition;

/// Where a filling session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting edits.
    Editing,
    /// Running the field validators during a submit.
    Validating,
    /// Response recorded; edits are ignored until `restart`.
    Submitted,
}

/// A respondent's view of one form: current values, per-field errors,
/// and the submit state machine.
#[derive(Debug)]
pub struct SubmissionSession {
    form: FormDefinition,
    schema: DerivedSchema,
    values: IndexMap<String, FieldValue>,
    errors: IndexMap<String, String>,
    state: SessionState,
}

impl SubmissionSession {
    /// Start a session over a snapshot of `form`, seeding values from
    /// the derived defaults.
    pub fn new(form: FormDefinition) -> Result<Self> {
        let schema = derive(&form.fields)?;
        let values = schema.defaults.clone();
        debug!(form = %form.id, fields = form.fields.len(), "submission session started");
        Ok(Self {
            form,
            schema,
            values,
            errors: IndexMap::new(),
            state: SessionState::Editing,
        })
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current values, keyed by field key in form order.
    pub fn values(&self) -> &IndexMap<String, FieldValue> {
        &self.values
    }

    /// Per-field failure messages from the last submit, minus any the
    /// respondent has edited since.
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Render descriptions for every field in form order, carrying the
    /// session's current values.
    pub fn controls(&self) -> Vec<ControlDescription> {
        self.form
            .fields
            .iter()
            .map(|field| {
                let current = self.values.get(&field.key).cloned().unwrap_or_default();
                render_control(field, &current)
            })
            .collect()
    }

    /// Record a value and clear that field's error. Unknown keys and
    /// submitted sessions are ignored.
    pub fn set_value(&mut self, key: &str, value: FieldValue) {
        if self.state == SessionState::Submitted {
            debug!(key, "ignoring edit on submitted session");
            return;
        }
        if !self.schema.validators.contains_key(key) {
            debug!(key, "ignoring value for unknown field key");
            return;
        }
        self.values.insert(key.to_string(), value);
        self.errors.shift_remove(key);
    }

    /// Toggle one option inside a multi-select value.
    pub fn toggle_value(&mut self, key: &str, option_value: &str) {
        if self.state == SessionState::Submitted {
            debug!(key, "ignoring edit on submitted session");
            return;
        }
        if !self.schema.validators.contains_key(key) {
            debug!(key, "ignoring toggle for unknown field key");
            return;
        }
        let current = self.values.get(key).cloned().unwrap_or_default();
        let next = toggle_choice(&current, option_value);
        self.values.insert(key.to_string(), next);
        self.errors.shift_remove(key);
    }

    /// Validate every field and, when all pass, record the response
    /// through the store.
    ///
    /// Validation failures are not errors: the session returns to
    /// editing carrying each field's first failure message. `Err` is
    /// reserved for the store rejecting the write, in which case the
    /// session also returns to editing so the submit can be retried.
    pub async fn submit(&mut self, store: &mut FormStore) -> Result<SessionState> {
        if self.state == SessionState::Submitted {
            return Ok(SessionState::Submitted);
        }
        self.state = SessionState::Validating;

        let mut errors = IndexMap::new();
        for (key, validator) in &self.schema.validators {
            let value = self.values.get(key).cloned().unwrap_or_default();
            if let Some(message) = validator.validate(&value).message() {
                errors.insert(key.clone(), message.to_string());
            }
        }
        if !errors.is_empty() {
            debug!(form = %self.form.id, failures = errors.len(), "submission failed validation");
            self.errors = errors;
            self.state = SessionState::Editing;
            return Ok(SessionState::Editing);
        }

        self.errors.clear();
        match store.save_form_response(self.form.id, self.values.clone()).await {
            Ok(response) => {
                debug!(form = %self.form.id, response = %response.id, "submission recorded");
                self.state = SessionState::Submitted;
                Ok(SessionState::Submitted)
            }
            Err(e) => {
                self.state = SessionState::Editing;
                Err(e)
            }
        }
    }

    /// Return to editing with values reset to the derived defaults.
    pub fn restart(&mut self) {
        self.values = self.schema.defaults.clone();
        self.errors.clear();
        self.state = SessionState::Editing;
    }
}
