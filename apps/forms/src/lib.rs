//! Entity editing forms for the job platform client: load an entity from the
//! shared store, edit a validated draft, persist it through the remote API,
//! and report the outcome to the user.

pub mod config;
pub mod dispatch;
pub mod editor;
pub mod errors;
pub mod form;
pub mod models;
pub mod notify;
pub mod selectors;
pub mod store;
pub mod validation;

pub use dispatch::{EntityApi, HttpEntityApi, MutationDispatcher, MutationRequest};
pub use editor::{EmployerProfileEditor, EntityEditor, ResumeEditor, SubmitReport};
pub use errors::{BindError, MutationError};
pub use form::{FieldBinding, FieldProps, FormController, FormStatus, Input, StatusHandle};
pub use models::{
    EmployerField, EmployerProfile, EmployerProfileFormValues, Entity, EntityId, FieldKind,
    FieldValue, FormField, FormValues, Resume, ResumeField, ResumeFormValues,
};
pub use notify::{MemorySink, Notification, NotificationSink, Severity, TracingSink};
pub use store::EntityStore;
pub use validation::ValidationResult;
