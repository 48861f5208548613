//! Mutation Dispatcher: the only writer of canonical entity state after load.
//!
//! One `submit` issues exactly one outbound update. While it is pending the
//! store's loading flag is raised; once it settles the flag drops, and on
//! success the server's copy replaces the stored entity. Failures are
//! returned to the caller untouched and never retried here.
//!
//! The request runs on its own task. Dropping the caller's future does not
//! abort it: the store is still reconciled when the server answers.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::MutationError;
use crate::models::{Entity, EntityId};
use crate::store::EntityStore;

pub use http::HttpEntityApi;

/// Identifier plus the fields to apply. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest<V> {
    id: EntityId,
    values: V,
}

impl<V> MutationRequest<V> {
    pub fn new(id: EntityId, values: V) -> Self {
        Self { id, values }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn values(&self) -> &V {
        &self.values
    }
}

/// Boundary to the remote persistence layer. Implement this to swap the
/// transport without touching forms or the dispatcher.
#[async_trait]
pub trait EntityApi<E: Entity>: Send + Sync {
    /// Applies `request` remotely and returns the updated entity.
    async fn update_entity(&self, request: &MutationRequest<E::Values>) -> Result<E, MutationError>;
}

pub struct MutationDispatcher<E: Entity> {
    store: EntityStore<E>,
    api: Arc<dyn EntityApi<E>>,
}

impl<E: Entity> Clone for MutationDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            api: Arc::clone(&self.api),
        }
    }
}

impl<E: Entity> MutationDispatcher<E> {
    pub fn new(store: EntityStore<E>, api: Arc<dyn EntityApi<E>>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    /// Sends one update and reconciles the store with its outcome.
    ///
    /// Single-flight is not enforced here: callers gate on the loading flag.
    pub async fn submit(&self, request: MutationRequest<E::Values>) -> Result<E, MutationError> {
        settle(self.spawn(request)).await
    }

    /// Raises the loading flag now and runs the update on a detached task
    /// that owns everything it needs to reconcile the store.
    pub fn spawn(&self, request: MutationRequest<E::Values>) -> JoinHandle<Result<E, MutationError>> {
        let loading = self.store.begin_mutation();
        let store = self.store.clone();
        let api = Arc::clone(&self.api);
        info!("Dispatching update for {} {}", E::RESOURCE, request.id());

        tokio::spawn(async move {
            let result = api.update_entity(&request).await;

            match &result {
                Ok(entity) => {
                    store.apply_entity_update(request.id(), entity.clone());
                    info!(
                        "Updated {} {} (updatedAt {})",
                        E::RESOURCE,
                        request.id(),
                        entity.updated_at()
                    );
                }
                Err(e) => {
                    warn!("Update for {} {} failed: {e}", E::RESOURCE, request.id());
                }
            }

            drop(loading);
            result
        })
    }
}

/// Waits for a spawned update. A task that panicked reports as `Interrupted`.
pub async fn settle<E>(handle: JoinHandle<Result<E, MutationError>>) -> Result<E, MutationError> {
    handle.await?
}
