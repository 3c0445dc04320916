//! Config store for loading and saving blackbox.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::types::ConfigScope;

use super::{BlackboxConfig, parser, paths::config_path_for_scope};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn from_paths(scope: ConfigScope, global_dir: &Path, project_root: &Path) -> Self {
        let config_path = config_path_for_scope(scope, global_dir, project_root);
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load the file, or defaults when it does not exist.
    pub fn load(&self) -> anyhow::Result<BlackboxConfig> {
        Ok(self.load_if_exists()?.unwrap_or_default())
    }

    pub fn load_if_exists(&self) -> anyhow::Result<Option<BlackboxConfig>> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        parser::parse_blackbox_toml(&self.config_path).map(Some)
    }

    /// Load the file as one unvalidated layer of the merged configuration.
    pub fn load_layer(&self) -> anyhow::Result<Option<BlackboxConfig>> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        parser::parse_blackbox_toml_layer(&self.config_path).map(Some)
    }

    pub fn save(&self, config: &BlackboxConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
