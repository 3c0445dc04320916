//! Catalog providers.
//!
//! A provider is the external source of descriptors. The rest of the crate
//! only sees the resulting [`Catalog`]; how it was fetched stays here.

use std::path::PathBuf;

use anyhow::Context;
use url::Url;

use super::{Catalog, load};
use crate::registry::RegistryClient;

/// Supplies the servers available for selection.
pub trait CatalogProvider {
    /// Load the catalog. Called once per session or on demand.
    fn load(&self) -> anyhow::Result<Catalog>;

    /// Human-readable description of where the catalog comes from.
    fn describe(&self) -> String;
}

/// The embedded palette list.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogProvider for BuiltinCatalog {
    fn load(&self) -> anyhow::Result<Catalog> {
        Ok(Catalog::builtin())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// A JSON array of descriptors on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for FileCatalog {
    fn load(&self) -> anyhow::Result<Catalog> {
        load::read_catalog_file(&self.path)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// A registry search endpoint returning a server list.
#[derive(Debug, Clone)]
pub struct RegistryCatalog {
    url: Url,
}

impl RegistryCatalog {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Fetch the catalog from an async context.
    pub async fn load_async(&self) -> anyhow::Result<Catalog> {
        let response = RegistryClient::new()?.fetch(&self.url).await?;
        tracing::debug!(
            "Fetched {} of {} registry servers from {}",
            response.items.len(),
            response.total,
            self.url
        );
        Ok(Catalog::new(
            response.items.iter().map(|record| record.to_descriptor()),
        ))
    }
}

impl CatalogProvider for RegistryCatalog {
    fn load(&self) -> anyhow::Result<Catalog> {
        // Block on async fetch using tokio runtime
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;

        runtime
            .block_on(self.load_async())
            .with_context(|| format!("Failed to load catalog from registry {}", self.url))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
