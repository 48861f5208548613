//! Entities held by the shared store and the draft shapes edited by forms.

pub mod employer;
pub mod field;
pub mod resume;

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::BindError;
use crate::validation::ValidationResult;

pub use employer::{EmployerField, EmployerProfile, EmployerProfileFormValues};
pub use field::{FieldKind, FieldValue};
pub use resume::{Resume, ResumeField, ResumeFormValues};

/// Stable identifier of a persisted entity (a document id on the remote side).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptor metadata for one editable field of a draft.
pub trait FormField:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Every field, in display order.
    const ALL: &'static [Self];

    /// camelCase key used on the wire and in validation output.
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
    fn kind(self) -> FieldKind;

    fn placeholder(self) -> Option<&'static str> {
        None
    }

    fn read_only(self) -> bool {
        false
    }
}

/// A fully populated draft: typed access to every field plus its schema.
pub trait FormValues:
    Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static
{
    type Field: FormField;

    fn get(&self, field: Self::Field) -> FieldValue;

    /// Stores `value` into `field`. Fails only when the value's kind does not
    /// match the field's kind; coercion from raw input happens in the form layer.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<(), BindError>;

    fn validate(&self) -> ValidationResult<Self::Field>;
}

/// A canonical record owned by the shared store.
pub trait Entity: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    type Values: FormValues;

    /// REST collection path relative to the API base, e.g. `resumes`.
    const RESOURCE: &'static str;
    /// Title of every notification raised by this entity's form.
    const NOTIFICATION_TITLE: &'static str;
    const SUCCESS_MESSAGE: &'static str;

    fn id(&self) -> &EntityId;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Projects the editable fields into a draft.
    fn form_values(&self) -> Self::Values;
}

/// Reads `null` and absent keys as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shared by the `FormValues::set` implementations.
pub(crate) fn kind_mismatch<F: FormField>(field: F) -> BindError {
    BindError::KindMismatch {
        field: field.key(),
        expected: field.kind().as_str(),
    }
}
