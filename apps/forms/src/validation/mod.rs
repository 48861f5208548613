//! Schema validation for form drafts.
//!
//! Validators are pure functions of a draft: no I/O, no mutation, same input
//! same output. A field missing from the result is valid; a draft may be
//! submitted only when the result is empty.

pub mod employer;
pub mod resume;
pub mod rules;

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Field → error message for every field that currently fails its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for ValidationResult<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> ValidationResult<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Records `message` for `field`. The first failing rule per field wins.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Applies a rule outcome: `Some(message)` marks the field invalid.
    pub fn check(&mut self, field: F, outcome: Option<String>) {
        if let Some(message) = outcome {
            self.insert(field, message);
        }
    }

    pub fn remove(&mut self, field: F) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, F, String> {
        self.errors.iter()
    }
}

impl<'a, F: Ord> IntoIterator for &'a ValidationResult<F> {
    type Item = (&'a F, &'a String);
    type IntoIter = btree_map::Iter<'a, F, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
