//! Selection set management
//!
//! The selection is the ordered, duplicate-free list of server ids a user has
//! dropped into the blackbox. It is resolved against a [`Catalog`] on demand,
//! so the two can be populated independently and in any order.

pub mod manager;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ServerDescriptor};

pub use manager::SelectionManager;
pub use store::{JsonSelectionStore, MemorySelectionStore, SELECTION_KEY, SelectionStore};

/// Ordered set of selected server ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted ids, keeping the first occurrence of each.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            set.add(id);
        }
        set
    }

    /// Append `id` unless it is already selected. Returns whether it was added.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Descriptors for the selected ids, in selection order.
    ///
    /// Ids missing from the catalog are skipped.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ServerDescriptor> {
        self.ids.iter().filter_map(|id| catalog.get(id)).collect()
    }

    /// Selected ids that the catalog does not know about.
    pub fn unresolved(&self, catalog: &Catalog) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|id| !catalog.contains(id))
            .map(String::as_str)
            .collect()
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<SelectionSet> for Vec<String> {
    fn from(set: SelectionSet) -> Self {
        set.ids
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
