//! Client-held collections synchronized against the backend
//!
//! Two update strategies are kept apart on purpose:
//! - [`LocalState::apply_optimistic`] changes local state right away from what
//!   the caller already has, with no reload to reconcile it.
//! - [`LocalState::apply_confirmed`] waits for the backend to acknowledge
//!   and only then touches local state.
//!
//! Additions use the first and removals the second.

use crate::api::ApiResult;
use shopsmart_common::{Item, ShoppingList};
use std::future::Future;

/// Anything with a stable backend identifier
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for ShoppingList {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A change to a local collection
#[derive(Debug, Clone, PartialEq)]
pub enum LocalUpdate<T> {
    /// Insert at the front (newest first)
    Prepend(T),
    /// Remove the entry with this id
    Remove(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalState<T> {
    entries: Vec<T>,
}

impl<T> Default for LocalState<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Identified> LocalState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace everything with a fresh backend snapshot
    pub fn replace_all(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    /// Apply immediately; local state may diverge until the next reload
    pub fn apply_optimistic(&mut self, update: LocalUpdate<T>) {
        self.apply(update);
    }

    /// Apply only once `confirmation` resolves successfully.
    ///
    /// On failure local state is untouched and the error is returned.
    pub async fn apply_confirmed<F>(&mut self, update: LocalUpdate<T>, confirmation: F) -> ApiResult<()>
    where
        F: Future<Output = ApiResult<()>>,
    {
        confirmation.await?;
        self.apply(update);
        Ok(())
    }

    fn apply(&mut self, update: LocalUpdate<T>) {
        match update {
            LocalUpdate::Prepend(entry) => self.entries.insert(0, entry),
            LocalUpdate::Remove(id) => self.entries.retain(|e| e.id() != id),
        }
    }
}
