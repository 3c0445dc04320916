//! Catalog loading from JSON files.

use std::path::Path;

use anyhow::{Context, Result};

use super::{Catalog, ServerDescriptor};

/// Read a catalog file holding a JSON array of server descriptors.
pub fn read_catalog_file(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    parse_catalog_json(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}

/// Parse a JSON array of server descriptors.
pub fn parse_catalog_json(content: &str) -> Result<Catalog> {
    let descriptors: Vec<ServerDescriptor> =
        serde_json::from_str(content).context("Catalog must be a JSON array of servers")?;

    for descriptor in &descriptors {
        if descriptor.id.trim().is_empty() {
            anyhow::bail!("Catalog entry '{}' has an empty id", descriptor.name);
        }
    }

    Ok(Catalog::new(descriptors))
}
