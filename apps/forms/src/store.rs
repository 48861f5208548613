use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::models::{Entity, EntityId};

/// Shared, process-wide state for one entity kind: the canonical record plus
/// the loading flag. Handles are cheap to clone and all point at the same state.
///
/// Writers:
/// - `hydrate`: the data-fetch collaborator, before forms mount
/// - `apply_entity_update`: the mutation dispatcher's success path only
#[derive(Debug)]
pub struct EntityStore<E> {
    inner: Arc<RwLock<StoreState<E>>>,
}

#[derive(Debug)]
struct StoreState<E> {
    entity: Option<E>,
    in_flight: usize,
}

impl<E> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> {
    /// An empty store: nothing loaded yet.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                entity: None,
                in_flight: 0,
            })),
        }
    }

    pub fn with_entity(entity: E) -> Self {
        let store = Self::new();
        store.hydrate(entity);
        store
    }

    /// Loads (or reloads) the canonical entity from the data-fetch layer.
    pub fn hydrate(&self, entity: E) {
        debug!("Hydrating {} {}", E::RESOURCE, entity.id());
        self.write().entity = Some(entity);
    }

    pub fn entity(&self) -> Option<E> {
        self.read().entity.clone()
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.read().entity.as_ref().map(|e| e.id().clone())
    }

    /// Runs `f` against the current entity without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(Option<&E>) -> R) -> R {
        f(self.read().entity.as_ref())
    }

    /// True while at least one mutation for this entity is in flight.
    pub fn is_loading(&self) -> bool {
        self.read().in_flight > 0
    }

    /// Replaces the stored entity with the server's copy. Applied only while
    /// `id` still names the stored entity; returns whether it was applied.
    pub(crate) fn apply_entity_update(&self, id: &EntityId, entity: E) -> bool {
        let mut state = self.write();
        match state.entity.as_ref() {
            Some(current) if current.id() == id => {
                debug!(
                    "Applying update to {} {id} (updatedAt {} -> {})",
                    E::RESOURCE,
                    current.updated_at(),
                    entity.updated_at()
                );
                state.entity = Some(entity);
                true
            }
            _ => {
                warn!(
                    "Dropping update for {} {id}: store no longer holds that entity",
                    E::RESOURCE
                );
                false
            }
        }
    }

    /// Raises the loading flag until the returned guard is dropped.
    pub(crate) fn begin_mutation(&self) -> LoadingGuard<E> {
        self.write().in_flight += 1;
        LoadingGuard {
            store: self.clone(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState<E>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState<E>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the store's loading flag raised for as long as it lives.
#[derive(Debug)]
pub(crate) struct LoadingGuard<E: Entity> {
    store: EntityStore<E>,
}

impl<E: Entity> Drop for LoadingGuard<E> {
    fn drop(&mut self) {
        let mut state = self.store.write();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resume;
    use chrono::{TimeZone, Utc};

    fn resume(id: &str, hour: u32) -> Resume {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "position": "Rust developer",
            "updatedAt": Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }))
        .unwrap()
    }

    #[test]
    fn test_new_store_is_empty_and_idle() {
        let store: EntityStore<Resume> = EntityStore::new();
        assert!(store.entity().is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_clones_share_state() {
        let store = EntityStore::new();
        let other = store.clone();
        store.hydrate(resume("r1", 9));
        assert_eq!(other.entity_id(), Some(EntityId::new("r1")));
    }

    #[test]
    fn test_apply_update_replaces_matching_entity() {
        let store = EntityStore::with_entity(resume("r1", 9));
        assert!(store.apply_entity_update(&EntityId::new("r1"), resume("r1", 10)));
        let stored = store.entity().unwrap();
        assert_eq!(stored.updated_at, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_apply_update_ignores_other_entity() {
        let store = EntityStore::with_entity(resume("r2", 9));
        assert!(!store.apply_entity_update(&EntityId::new("r1"), resume("r1", 10)));
        assert_eq!(store.entity_id(), Some(EntityId::new("r2")));
    }

    #[test]
    fn test_apply_update_on_empty_store_is_dropped() {
        let store: EntityStore<Resume> = EntityStore::new();
        assert!(!store.apply_entity_update(&EntityId::new("r1"), resume("r1", 10)));
        assert!(store.entity().is_none());
    }

    #[test]
    fn test_loading_flag_follows_guards() {
        let store = EntityStore::with_entity(resume("r1", 9));
        let first = store.begin_mutation();
        let second = store.begin_mutation();
        assert!(store.is_loading());
        drop(first);
        assert!(store.is_loading());
        drop(second);
        assert!(!store.is_loading());
    }
}
