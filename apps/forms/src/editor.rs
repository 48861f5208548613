//! One edit-and-save pipeline shared by every entity form:
//! store → selector → form → validator → dispatcher → store → notification.

use std::sync::Arc;

use tracing::{debug, info};

use crate::dispatch::{settle, EntityApi, MutationDispatcher, MutationRequest};
use crate::errors::MutationError;
use crate::form::{FieldBinding, FormController, SubmitOutcome};
use crate::models::{EmployerProfile, Entity, FormValues, Resume};
use crate::notify::{Notification, NotificationSink};
use crate::selectors::{select_form_values, select_is_loading, select_last_updated};
use crate::store::EntityStore;
use crate::validation::ValidationResult;

pub type ResumeEditor = EntityEditor<Resume>;
pub type EmployerProfileEditor = EntityEditor<EmployerProfile>;

type FieldOf<E> = <<E as Entity>::Values as FormValues>::Field;

/// How a submit attempt ended.
#[derive(Debug)]
pub enum SubmitReport<E: Entity> {
    /// Validation failed; errors are shown inline, nothing was sent.
    Invalid(ValidationResult<FieldOf<E>>),
    /// A mutation for this entity is already in flight; nothing was sent.
    Busy,
    /// No entity was loaded when the form mounted; nothing was sent.
    NotLoaded,
    Saved(E),
    Failed(MutationError),
}

impl<E: Entity> SubmitReport<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitReport::Saved(_))
    }
}

pub struct EntityEditor<E: Entity> {
    store: EntityStore<E>,
    dispatcher: MutationDispatcher<E>,
    sink: Arc<dyn NotificationSink>,
    form: FormController<E::Values>,
}

impl<E: Entity> EntityEditor<E> {
    /// Mounts the form with a draft copied from the store's current entity.
    pub fn mount(
        store: EntityStore<E>,
        api: Arc<dyn EntityApi<E>>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let form = mount_form(&store);
        let dispatcher = MutationDispatcher::new(store.clone(), api);
        Self {
            store,
            dispatcher,
            sink,
            form,
        }
    }

    pub fn form(&self) -> &FormController<E::Values> {
        &self.form
    }

    pub fn bind(&mut self, field: FieldOf<E>) -> FieldBinding<'_, E::Values> {
        self.form.bind(field)
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    /// Remounts the draft if the store now holds a different entity.
    /// Returns whether a remount happened; edits to the old draft are discarded.
    pub fn sync(&mut self) -> bool {
        let current = self.store.entity_id();
        if current.as_ref() == self.form.entity_id() {
            return false;
        }
        debug!(
            "{} identity changed ({:?} -> {:?}), remounting form",
            E::RESOURCE,
            self.form.entity_id(),
            current
        );
        self.form = mount_form(&self.store);
        true
    }

    /// The submit control is disabled while a mutation is in flight.
    pub fn is_submit_disabled(&self) -> bool {
        select_is_loading(&self.store)
    }

    pub fn last_updated(&self) -> Option<String> {
        select_last_updated(&self.store)
    }

    /// Runs one submit attempt end to end. Exactly one notification is shown
    /// for every attempt that reaches the dispatch stage; validation failures
    /// and busy rejections stay silent and inline.
    ///
    /// Once dispatched, the update settles and notifies on its own task, so
    /// dropping this future or the editor does not lose the outcome.
    pub async fn submit(&mut self) -> SubmitReport<E> {
        if self.is_submit_disabled() {
            debug!("Submit ignored: {} update already in flight", E::RESOURCE);
            return SubmitReport::Busy;
        }

        let dispatcher = self.dispatcher.clone();
        let sink = Arc::clone(&self.sink);
        let entity_id = self.form.entity_id().cloned();
        let outcome = self
            .form
            .submit(move |values| async move {
                let id = match entity_id {
                    Some(id) => id,
                    None => return Err(MutationError::NotLoaded),
                };
                let pending = dispatcher.spawn(MutationRequest::new(id, values));
                settle(tokio::spawn(async move {
                    let result = settle(pending).await;
                    announce::<E>(sink.as_ref(), &result);
                    result
                }))
                .await
            })
            .await;

        let result = match outcome {
            SubmitOutcome::Invalid(errors) => return SubmitReport::Invalid(errors),
            SubmitOutcome::Submitted(result) => result,
        };

        match result {
            Ok(entity) => SubmitReport::Saved(entity),
            Err(MutationError::NotLoaded) => {
                self.sink.show(Notification::failure(
                    E::NOTIFICATION_TITLE,
                    MutationError::NotLoaded.to_string(),
                ));
                SubmitReport::NotLoaded
            }
            Err(err) => SubmitReport::Failed(err),
        }
    }
}

fn announce<E: Entity>(sink: &dyn NotificationSink, result: &Result<E, MutationError>) {
    match result {
        Ok(entity) => {
            info!("{}: saved {}", E::NOTIFICATION_TITLE, entity.id());
            sink.show(Notification::success(
                E::NOTIFICATION_TITLE,
                E::SUCCESS_MESSAGE,
            ));
        }
        Err(err) => {
            sink.show(Notification::failure(E::NOTIFICATION_TITLE, err.to_string()));
        }
    }
}

fn mount_form<E: Entity>(store: &EntityStore<E>) -> FormController<E::Values> {
    FormController::initialize(store.entity_id(), select_form_values(store))
}
