//! Selection persistence
//!
//! The selection is stored in a small key-value JSON document under a single
//! well-known key, so other frontends can keep their own keys next to it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

/// Key under which the selected ids are persisted.
pub const SELECTION_KEY: &str = "selected-mcps";

/// Load/save hooks for the selected ids.
pub trait SelectionStore {
    fn load(&self) -> anyhow::Result<Vec<String>>;
    fn save(&self, ids: &[String]) -> anyhow::Result<()>;
}

impl<S: SelectionStore + ?Sized> SelectionStore for &S {
    fn load(&self) -> anyhow::Result<Vec<String>> {
        (**self).load()
    }

    fn save(&self, ids: &[String]) -> anyhow::Result<()> {
        (**self).save(ids)
    }
}

/// File-backed key-value store.
#[derive(Debug, Clone)]
pub struct JsonSelectionStore {
    path: PathBuf,
    key: String,
}

impl JsonSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: SELECTION_KEY.to_string(),
        }
    }

    /// Store the selection under a different key of the same file.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entries of the file; an unparseable document reads as empty.
    fn read_entries(&self) -> anyhow::Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read selection file: {}", self.path.display()))?;
        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable selection file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

impl SelectionStore for JsonSelectionStore {
    fn load(&self) -> anyhow::Result<Vec<String>> {
        let mut entries = self.read_entries()?;
        match entries.remove(&self.key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => match serde_json::from_value(value) {
                Ok(ids) => Ok(ids),
                Err(e) => {
                    tracing::warn!(
                        "Selection key '{}' in {} is not a list of ids, starting empty: {}",
                        self.key,
                        self.path.display(),
                        e
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Save atomically (tmp + rename), keeping unrelated keys.
    ///
    /// An unparseable file is replaced.
    fn save(&self, ids: &[String]) -> anyhow::Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(self.key.clone(), Value::from(ids.to_vec()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_vec_pretty(&entries).context("Failed to serialize selection")?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write selection file: {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("Failed to replace selection file: {}", self.path.display())
        })?;

        tracing::debug!("Saved {} selected ids to {}", ids.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    ids: RefCell<Vec<String>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: RefCell::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// The last saved ids.
    pub fn snapshot(&self) -> Vec<String> {
        self.ids.borrow().clone()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, ids: &[String]) -> anyhow::Result<()> {
        *self.ids.borrow_mut() = ids.to_vec();
        Ok(())
    }
}
