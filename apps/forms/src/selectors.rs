//! Read accessors projecting the shared store into what a form needs.

use chrono::{DateTime, Utc};

use crate::models::Entity;
use crate::store::EntityStore;

/// `toUTCString`-style stamp: `Tue, 15 Nov 1994 08:12:31 GMT`.
const UTC_STAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn select_entity<E: Entity>(store: &EntityStore<E>) -> Option<E> {
    store.entity()
}

pub fn select_is_loading<E: Entity>(store: &EntityStore<E>) -> bool {
    store.is_loading()
}

/// Draft-shaped projection of the stored entity. When nothing is loaded yet
/// every field takes its default (empty text, `0`, unchecked), so the draft
/// is always fully populated.
pub fn select_form_values<E: Entity>(store: &EntityStore<E>) -> E::Values {
    store.with(|entity| entity.map(Entity::form_values).unwrap_or_default())
}

pub fn select_last_updated<E: Entity>(store: &EntityStore<E>) -> Option<String> {
    store.with(|entity| entity.map(|e| format_utc(e.updated_at())))
}

pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format(UTC_STAMP_FORMAT).to_string()
}
