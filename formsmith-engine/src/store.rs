//! FormStore: the authoring API over the form collection.
//!
//! The store owns the in-memory collection and writes the whole
//! collection through its storage backend after every mutation. Memory
//! is authoritative: a failed persistence write is logged and absorbed,
//! never rolled back, so a mutation that succeeded in memory reports
//! success even when the backend is down.
//!
//! Lookups that miss return explicit errors with state unchanged;
//! nothing in here panics on caller input.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, warn};

use formsmith_fields::{generate_key, FieldDefinition, FieldId, FieldsError, FieldValue};

use crate::error::{EngineError, Result};
use crate::ids::FormId;
use crate::storage::FormStorage;
use crate::types::{FieldConfig, FieldUpdate, FormConfigUpdate, FormDefinition, FormResponse};

/// The form collection and its authoring operations.
pub struct FormStore {
    storage: Arc<dyn FormStorage>,
    forms: Vec<FormDefinition>,
    current_form: Option<FormId>,
}

impl FormStore {
    /// Open a store over the given backend, loading the persisted
    /// collection into memory.
    pub async fn open(storage: Arc<dyn FormStorage>) -> Result<Self> {
        let forms = storage.load().await?;
        debug!(forms = forms.len(), "form store opened");
        Ok(Self {
            storage,
            forms,
            current_form: None,
        })
    }

    /// Create an empty draft form and make it current.
    pub async fn create_form(&mut self, name: &str, description: &str) -> Result<FormDefinition> {
        if name.trim().is_empty() {
            return Err(EngineError::EmptyFormName);
        }
        let form = FormDefinition::new(name, description);
        self.forms.push(form.clone());
        self.current_form = Some(form.id);
        self.persist().await;
        debug!(form = %form.id, name = %form.name, "created form");
        Ok(form)
    }

    /// Append a field built from `config` over the default template.
    /// The key is derived from the label and de-duplicated against the
    /// form's existing keys.
    pub async fn add_field(
        &mut self,
        form_id: FormId,
        config: FieldConfig,
    ) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        if config.label.trim().is_empty() {
            return Err(EngineError::EmptyFieldLabel);
        }
        if config.field_type.options_required() && config.field_type.options().is_empty() {
            return Err(EngineError::missing_options(&config.label));
        }
        let base = generate_key(&config.label);
        if base.is_empty() {
            return Err(FieldsError::blank_key(&config.label).into());
        }

        let form = &mut self.forms[index];
        let key = unique_key(&base, &form.fields, None);
        let order = form.fields.len();
        let field = FieldDefinition {
            id: FieldId::new(),
            key,
            field_type: config.field_type,
            label: config.label,
            placeholder: config.placeholder,
            help_text: config.help_text,
            required: config.required,
            default_value: config.default_value,
            validation: config.validation,
            order,
        };
        debug!(form = %form_id, field = %field.id, key = %field.key, "added field");
        form.fields.push(field);
        form.updated_at = Utc::now();
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Shallow-merge `updates` into the matching field, preserving its
    /// position. A label change regenerates the key only while the key
    /// is still label-derived; a manual key override must not collide
    /// with a sibling key.
    pub async fn update_field(
        &mut self,
        form_id: FormId,
        field_id: FieldId,
        updates: FieldUpdate,
    ) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        let position = self.forms[index]
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| EngineError::field_not_found(field_id))?;

        // Validate everything before touching the field, so an error
        // leaves the form exactly as it was.
        if let Some(label) = &updates.label {
            if label.trim().is_empty() {
                return Err(EngineError::EmptyFieldLabel);
            }
        }
        if let Some(field_type) = &updates.field_type {
            if field_type.options_required() && field_type.options().is_empty() {
                let label = updates
                    .label
                    .clone()
                    .unwrap_or_else(|| self.forms[index].fields[position].label.clone());
                return Err(EngineError::missing_options(label));
            }
        }
        let new_key = {
            let fields = &self.forms[index].fields;
            let current = &fields[position];
            if let Some(manual) = &updates.key {
                if manual.trim().is_empty() {
                    return Err(FieldsError::blank_key(&current.label).into());
                }
                if key_taken(fields, manual, Some(field_id)) {
                    return Err(FieldsError::duplicate_key(manual).into());
                }
                Some(manual.clone())
            } else if let Some(label) = &updates.label {
                if *label != current.label && current.key_derived_from_label() {
                    let base = generate_key(label);
                    if base.is_empty() {
                        None
                    } else {
                        Some(unique_key(&base, fields, Some(field_id)))
                    }
                } else {
                    None
                }
            } else {
                None
            }
        };

        let form = &mut self.forms[index];
        let field = &mut form.fields[position];
        if let Some(field_type) = updates.field_type {
            field.field_type = field_type;
        }
        if let Some(label) = updates.label {
            field.label = label;
        }
        if let Some(key) = new_key {
            field.key = key;
        }
        if let Some(placeholder) = updates.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(help_text) = updates.help_text {
            field.help_text = help_text;
        }
        if let Some(required) = updates.required {
            field.required = required;
        }
        if let Some(default_value) = updates.default_value {
            field.default_value = Some(default_value);
        }
        if let Some(validation) = updates.validation {
            field.validation = validation;
        }
        if let Some(order) = updates.order {
            field.order = order;
        }
        debug!(form = %form_id, field = %field_id, "updated field");
        form.updated_at = Utc::now();
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Remove the matching field. Remaining `order` values keep their
    /// gaps; order is a sort key, not a dense index.
    pub async fn remove_field(
        &mut self,
        form_id: FormId,
        field_id: FieldId,
    ) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        let form = &mut self.forms[index];
        let position = form
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| EngineError::field_not_found(field_id))?;
        form.fields.remove(position);
        form.updated_at = Utc::now();
        debug!(form = %form_id, field = %field_id, "removed field");
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Deep-copy the matching field to the end of the list with a new
    /// id, a " (copy)" label suffix, and a key re-derived from the new
    /// label so the copy never collides with the original.
    pub async fn duplicate_field(
        &mut self,
        form_id: FormId,
        field_id: FieldId,
    ) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        let form = &mut self.forms[index];
        let source = form
            .fields
            .iter()
            .find(|f| f.id == field_id)
            .cloned()
            .ok_or_else(|| EngineError::field_not_found(field_id))?;

        let mut copy = source.clone();
        copy.id = FieldId::new();
        copy.label = format!("{} (copy)", source.label);
        let base = generate_key(&copy.label);
        copy.key = if base.is_empty() {
            unique_key(&source.key, &form.fields, None)
        } else {
            unique_key(&base, &form.fields, None)
        };
        copy.order = form.fields.len();
        debug!(form = %form_id, source = %field_id, copy = %copy.id, "duplicated field");
        form.fields.push(copy);
        form.updated_at = Utc::now();
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Rebuild the field list in the given order. The id list must be
    /// a permutation of the form's field ids; `order` is renumbered
    /// densely to match.
    pub async fn reorder_fields(
        &mut self,
        form_id: FormId,
        ordered: &[FieldId],
    ) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        let form = &mut self.forms[index];
        if ordered.len() != form.fields.len() {
            return Err(EngineError::InvalidReorder);
        }
        let mut seen = vec![false; form.fields.len()];
        let mut positions = Vec::with_capacity(ordered.len());
        for id in ordered {
            match form.fields.iter().position(|f| f.id == *id) {
                Some(p) if !seen[p] => {
                    seen[p] = true;
                    positions.push(p);
                }
                _ => return Err(EngineError::InvalidReorder),
            }
        }
        let mut fields = Vec::with_capacity(positions.len());
        for (order, p) in positions.into_iter().enumerate() {
            let mut field = form.fields[p].clone();
            field.order = order;
            fields.push(field);
        }
        form.fields = fields;
        form.updated_at = Utc::now();
        debug!(form = %form_id, "reordered fields");
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Update form name and/or description.
    pub async fn update_form_config(
        &mut self,
        form_id: FormId,
        updates: FormConfigUpdate,
    ) -> Result<FormDefinition> {
        if let Some(name) = &updates.name {
            if name.trim().is_empty() {
                return Err(EngineError::EmptyFormName);
            }
        }
        let index = self.form_index(form_id)?;
        let form = &mut self.forms[index];
        if let Some(name) = updates.name {
            form.name = name;
        }
        if let Some(description) = updates.description {
            form.description = description;
        }
        form.updated_at = Utc::now();
        debug!(form = %form_id, "updated form config");
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Mark the form published. `published_at` is written only on the
    /// first publish and never overwritten after that.
    pub async fn publish_form(&mut self, form_id: FormId) -> Result<FormDefinition> {
        let index = self.form_index(form_id)?;
        let form = &mut self.forms[index];
        form.is_published = true;
        if form.published_at.is_none() {
            form.published_at = Some(Utc::now());
        }
        form.updated_at = Utc::now();
        debug!(form = %form_id, "published form");
        let snapshot = form.clone();
        self.persist().await;
        Ok(snapshot)
    }

    /// Remove the form and everything it owns, responses included.
    /// Clears the current-form reference when it pointed here.
    pub async fn delete_form(&mut self, form_id: FormId) -> Result<()> {
        let index = self.form_index(form_id)?;
        let removed = self.forms.remove(index);
        if self.current_form == Some(form_id) {
            self.current_form = None;
        }
        debug!(form = %form_id, name = %removed.name, "deleted form");
        self.persist().await;
        Ok(())
    }

    /// Append a response with a fresh id and the current timestamp.
    /// Responses are capture, not authoring, so `updated_at` stays
    /// untouched.
    pub async fn save_form_response(
        &mut self,
        form_id: FormId,
        data: IndexMap<String, FieldValue>,
    ) -> Result<FormResponse> {
        let index = self.form_index(form_id)?;
        let response = FormResponse::new(data);
        self.forms[index].responses.push(response.clone());
        debug!(form = %form_id, response = %response.id, "saved form response");
        self.persist().await;
        Ok(response)
    }

    /// All forms, in creation order.
    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    /// Look up one form.
    pub fn form(&self, form_id: FormId) -> Option<&FormDefinition> {
        self.forms.iter().find(|f| f.id == form_id)
    }

    /// A form's captured responses, oldest first.
    pub fn responses(&self, form_id: FormId) -> Option<&[FormResponse]> {
        self.form(form_id).map(|f| f.responses.as_slice())
    }

    /// Make a form current, like opening it in the builder.
    pub fn set_current_form(&mut self, form_id: FormId) -> Result<&FormDefinition> {
        let index = self.form_index(form_id)?;
        self.current_form = Some(form_id);
        Ok(&self.forms[index])
    }

    /// The currently open form, if any.
    pub fn current_form(&self) -> Option<&FormDefinition> {
        self.current_form.and_then(|id| self.form(id))
    }

    pub fn clear_current_form(&mut self) {
        self.current_form = None;
    }

    fn form_index(&self, form_id: FormId) -> Result<usize> {
        self.forms
            .iter()
            .position(|f| f.id == form_id)
            .ok_or_else(|| EngineError::form_not_found(form_id))
    }

    /// Write the whole collection through the backend. Failures are
    /// logged and absorbed; memory stays authoritative.
    async fn persist(&self) {
        if let Err(e) = self.storage.save(&self.forms).await {
            warn!(%e, "failed to persist form collection, keeping in-memory state");
        }
    }
}

fn key_taken(fields: &[FieldDefinition], candidate: &str, skip: Option<FieldId>) -> bool {
    fields
        .iter()
        .filter(|f| skip.map_or(true, |id| f.id != id))
        .any(|f| f.key == candidate)
}

/// De-duplicate a derived key against a form's existing fields.
/// Collisions get a numeric suffix: `email`, `email2`, `email3`.
fn unique_key(base: &str, fields: &[FieldDefinition], skip: Option<FieldId>) -> String {
    if !key_taken(fields, base, skip) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if !key_taken(fields, &candidate, skip) {
            return candidate;
        }
        n += 1;
    }
}
