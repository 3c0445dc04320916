//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::catalog::{BuiltinCatalog, Catalog, CatalogProvider, FileCatalog, RegistryCatalog};
use crate::config::{BlackboxConfig, CatalogSource, ConfigStore, merge_configs};
use crate::selection::{JsonSelectionStore, SelectionManager};
use crate::session::{SessionFactory, UuidGenerator};
use crate::types::ConfigScope;

pub const SELECTION_FILE_NAME: &str = "selection.json";

/// Unified application context for dependency injection.
///
/// Provides access to configuration, the catalog provider, the selection
/// store and the session factory. Frontends (CLI/TUI/server) create this once
/// and pass it to the pieces that need it.
#[derive(Debug, Clone)]
pub struct AppContext {
    project_root: PathBuf,
    state_dir: PathBuf,
    global_config_dir: PathBuf,
}

impl AppContext {
    /// Create a new context with explicit project and state paths.
    pub fn new(project_root: PathBuf, state_dir: PathBuf) -> Self {
        let global_config_dir = dirs::config_dir()
            .map(|p| p.join("blackbox"))
            .unwrap_or_else(|| state_dir.join("config"));

        Self {
            project_root,
            state_dir,
            global_config_dir,
        }
    }

    /// Create context with custom global config directory (for testing).
    pub fn with_global_config_dir(
        project_root: PathBuf,
        state_dir: PathBuf,
        global_config_dir: PathBuf,
    ) -> Self {
        Self {
            project_root,
            state_dir,
            global_config_dir,
        }
    }

    /// Context for the current directory and the user's state directory.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let project_root = std::env::current_dir()?;
        Ok(Self::new(project_root, Self::default_state_dir()?))
    }

    /// `$XDG_STATE_HOME/blackbox`, falling back to the local data directory.
    pub fn default_state_dir() -> anyhow::Result<PathBuf> {
        let base = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .ok_or_else(|| anyhow::anyhow!("Cannot determine state directory"))?;
        Ok(base.join("blackbox"))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn global_config_dir(&self) -> &Path {
        &self.global_config_dir
    }

    /// Get a ConfigStore for the given scope.
    pub fn config_store(&self, scope: ConfigScope) -> ConfigStore {
        ConfigStore::from_paths(scope, &self.global_config_dir, &self.project_root)
    }

    /// Load and merge the global and project configuration.
    ///
    /// Validation runs on the merged result, so a project file may complete
    /// a global one field by field.
    pub fn load_config(&self) -> anyhow::Result<BlackboxConfig> {
        let global = self.config_store(ConfigScope::Global).load_layer()?;
        let project = self.config_store(ConfigScope::Project).load_layer()?;

        let merged = merge_configs(
            global,
            &self.global_config_dir,
            project,
            &self.project_root,
        );
        merged
            .validate()
            .context("Invalid configuration after merging global and project files")?;
        Ok(merged)
    }

    /// Get the file-backed selection store.
    pub fn selection_store(&self) -> JsonSelectionStore {
        JsonSelectionStore::new(self.state_dir.join(SELECTION_FILE_NAME))
    }

    /// Load the persisted selection.
    pub fn selection_manager(&self) -> anyhow::Result<SelectionManager<JsonSelectionStore>> {
        SelectionManager::load(self.selection_store())
    }

    /// Get the provider for a catalog source.
    ///
    /// Relative file paths are resolved against the project root.
    pub fn catalog_provider(&self, source: &CatalogSource) -> Box<dyn CatalogProvider> {
        match source {
            CatalogSource::Builtin => Box::new(BuiltinCatalog),
            CatalogSource::File(path) => Box::new(FileCatalog::new(self.project_root.join(path))),
            CatalogSource::Registry(url) => Box::new(RegistryCatalog::new(url.clone())),
        }
    }

    /// Load the catalog from `source`.
    pub fn load_catalog(&self, source: &CatalogSource) -> anyhow::Result<Catalog> {
        let provider = self.catalog_provider(source);
        let catalog = provider.load()?;
        tracing::debug!(
            "Loaded {} servers from {}",
            catalog.len(),
            provider.describe()
        );
        Ok(catalog)
    }

    /// Get a SessionFactory using the configured base URL.
    pub fn session_factory(
        &self,
        config: &BlackboxConfig,
    ) -> anyhow::Result<SessionFactory<UuidGenerator>> {
        Ok(SessionFactory::new(config.session_base_url()?, UuidGenerator))
    }
}
