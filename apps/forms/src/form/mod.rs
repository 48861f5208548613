//! Form Controller: owns the local draft of one entity while its form is mounted.
//!
//! The draft is a copy taken at mount time; the controller never writes to
//! the shared store. Submission validates the whole draft and, only when it
//! is clean, hands a snapshot of the values to the caller's handler.

pub mod binding;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::BindError;
use crate::models::{EntityId, FieldKind, FieldValue, FormField, FormValues};
use crate::validation::ValidationResult;

pub use binding::{coerce, FieldBinding, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
}

/// Shared view of one form's status. Clones observe the same form, so a
/// caller can watch a submit while the controller itself is borrowed.
#[derive(Debug, Clone, Default)]
pub struct StatusHandle(Arc<AtomicBool>);

impl StatusHandle {
    pub fn get(&self) -> FormStatus {
        if self.0.load(Ordering::Acquire) {
            FormStatus::Submitting
        } else {
            FormStatus::Idle
        }
    }

    fn set(&self, status: FormStatus) {
        self.0
            .store(status == FormStatus::Submitting, Ordering::Release);
    }
}

/// Result of `FormController::submit`.
#[derive(Debug)]
pub enum SubmitOutcome<F: Ord, T> {
    /// Validation failed; the handler was not called.
    Invalid(ValidationResult<F>),
    /// The handler ran to completion with this output.
    Submitted(T),
}

/// Everything an input control needs to render one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProps {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: FieldKind,
    pub read_only: bool,
    pub value: FieldValue,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug)]
pub struct FormController<V: FormValues> {
    entity_id: Option<EntityId>,
    draft: V,
    dirty: BTreeSet<V::Field>,
    errors: ValidationResult<V::Field>,
    status: StatusHandle,
}

impl<V: FormValues> FormController<V> {
    /// Mounts a form over `values`, copied from the entity identified by `entity_id`.
    pub fn initialize(entity_id: Option<EntityId>, values: V) -> Self {
        Self {
            entity_id,
            draft: values,
            dirty: BTreeSet::new(),
            errors: ValidationResult::new(),
            status: StatusHandle::default(),
        }
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        self.entity_id.as_ref()
    }

    pub fn values(&self) -> &V {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationResult<V::Field> {
        &self.errors
    }

    pub fn status(&self) -> FormStatus {
        self.status.get()
    }

    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_field_dirty(&self, field: V::Field) -> bool {
        self.dirty.contains(&field)
    }

    pub fn bind(&mut self, field: V::Field) -> FieldBinding<'_, V> {
        FieldBinding { form: self, field }
    }

    pub fn field_props(&self, field: V::Field) -> FieldProps {
        FieldProps {
            key: field.key(),
            label: field.label(),
            placeholder: field.placeholder(),
            kind: field.kind(),
            read_only: field.read_only(),
            value: self.draft.get(field),
            error: self.errors.get(field).map(str::to_string),
            dirty: self.is_field_dirty(field),
        }
    }

    /// Props for every field, in display order.
    pub fn all_field_props(&self) -> Vec<FieldProps> {
        <V::Field as FormField>::ALL
            .iter()
            .map(|&field| self.field_props(field))
            .collect()
    }

    /// Applies an input event to the draft. Marks the field dirty and clears
    /// its displayed error; a rejected event changes nothing.
    pub fn change(&mut self, field: V::Field, input: Input<'_>) -> Result<(), BindError> {
        if field.read_only() {
            return Err(BindError::ReadOnly { field: field.key() });
        }
        let value = coerce(field, input)?;
        self.draft.set(field, value)?;
        self.dirty.insert(field);
        self.errors.remove(field);
        Ok(())
    }

    /// Runs the schema over the draft, ignoring read-only fields: they show
    /// the loaded value and the user has no way to correct them.
    pub fn validate(&self) -> ValidationResult<V::Field> {
        let mut result = self.draft.validate();
        for &field in <V::Field as FormField>::ALL {
            if field.read_only() {
                result.remove(field);
            }
        }
        result
    }

    /// Re-runs the schema and keeps only this field's outcome.
    pub fn validate_field(&mut self, field: V::Field) -> Option<&str> {
        let result = self.validate();
        match result.get(field) {
            Some(message) => {
                self.errors.remove(field);
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(field);
            }
        }
        self.errors.get(field)
    }

    /// Validates the whole draft and, when clean, runs `handler` on a
    /// snapshot of the values. Status is `Submitting` only while the handler
    /// is pending and always returns to `Idle`, even if this future is dropped.
    /// Read the status through `status_handle` while the submit is running.
    pub async fn submit<H, Fut, T>(&mut self, handler: H) -> SubmitOutcome<V::Field, T>
    where
        H: FnOnce(V) -> Fut,
        Fut: Future<Output = T>,
    {
        self.errors = self.validate();
        if !self.errors.is_valid() {
            debug!(
                "Submit blocked by {} invalid field(s): {:?}",
                self.errors.len(),
                self.errors.fields().map(|f| f.key()).collect::<Vec<_>>()
            );
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let values = self.draft.clone();
        let status = SubmittingGuard::enter(&self.status);
        let output = handler(values).await;
        drop(status);
        SubmitOutcome::Submitted(output)
    }
}

/// Holds the form in `Submitting` and restores `Idle` on drop.
struct SubmittingGuard {
    status: StatusHandle,
}

impl SubmittingGuard {
    fn enter(status: &StatusHandle) -> Self {
        status.set(FormStatus::Submitting);
        Self {
            status: status.clone(),
        }
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.status.set(FormStatus::Idle);
    }
}
