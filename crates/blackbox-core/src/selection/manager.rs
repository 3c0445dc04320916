//! Selection manager: an owned selection bound to its persistence hooks.

use anyhow::Context;

use super::{SelectionSet, SelectionStore};
use crate::catalog::{Catalog, ServerDescriptor};

/// Owns the selection for one UI session and writes it back on change.
#[derive(Debug)]
pub struct SelectionManager<S: SelectionStore> {
    store: S,
    selection: SelectionSet,
}

impl<S: SelectionStore> SelectionManager<S> {
    /// Load the persisted selection from `store`.
    pub fn load(store: S) -> anyhow::Result<Self> {
        let ids = store.load().context("Failed to load selection")?;
        let selection = SelectionSet::from_ids(ids);
        tracing::debug!("Loaded selection with {} ids", selection.len());
        Ok(Self { store, selection })
    }

    /// Start from an empty selection without reading the store.
    pub fn empty(store: S) -> Self {
        Self {
            store,
            selection: SelectionSet::new(),
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Add `id` and persist if it was not selected yet.
    ///
    /// When saving fails the selection is left unchanged.
    pub fn add(&mut self, id: impl Into<String>) -> anyhow::Result<bool> {
        let id = id.into();
        let previous = self.selection.clone();
        let added = self.selection.add(id.clone());
        if added {
            tracing::debug!("Selected {}", id);
            self.commit(previous)?;
        }
        Ok(added)
    }

    /// Remove `id` and persist if it was selected.
    ///
    /// When saving fails the selection is left unchanged.
    pub fn remove(&mut self, id: &str) -> anyhow::Result<bool> {
        let previous = self.selection.clone();
        let removed = self.selection.remove(id);
        if removed {
            tracing::debug!("Deselected {}", id);
            self.commit(previous)?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let previous = std::mem::take(&mut self.selection);
        self.commit(previous)
    }

    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ServerDescriptor> {
        self.selection.resolve(catalog)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist the current selection, restoring `previous` on failure.
    fn commit(&mut self, previous: SelectionSet) -> anyhow::Result<()> {
        let saved = self
            .store
            .save(self.selection.ids())
            .context("Failed to save selection");
        if saved.is_err() {
            self.selection = previous;
        }
        saved
    }
}
