//! Combined configuration composer
//!
//! Turns the resolved selection into one client document that lists the
//! config fragment of every selected server, in selection order.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Catalog, ServerDescriptor};
use crate::selection::SelectionSet;

pub const CLIENT_SCHEMA_URL: &str =
    "https://static.modelcontextprotocol.io/schemas/2025-09-29/client.schema.json";
pub const COMBINED_NAME: &str = "combined-mcp-blackbox";
pub const COMBINED_DESCRIPTION: &str =
    "Exposes selected MCP servers as a single virtual MCP using a passthrough tool namespace.";

/// The composed client document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedConfiguration {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub description: String,
    pub combined_servers: Vec<Value>,
}

impl CombinedConfiguration {
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize combined configuration")
    }

    pub fn len(&self) -> usize {
        self.combined_servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined_servers.is_empty()
    }
}

/// Compose the given descriptors into one document.
///
/// Fragments are copied verbatim: no merging, deduplication or validation.
pub fn compose<'a, I>(selected: I) -> CombinedConfiguration
where
    I: IntoIterator<Item = &'a ServerDescriptor>,
{
    CombinedConfiguration {
        schema: CLIENT_SCHEMA_URL.to_string(),
        name: COMBINED_NAME.to_string(),
        description: COMBINED_DESCRIPTION.to_string(),
        combined_servers: selected.into_iter().map(|s| s.config.clone()).collect(),
    }
}

/// Resolve `selection` against `catalog` and compose the result.
pub fn compose_selection(selection: &SelectionSet, catalog: &Catalog) -> CombinedConfiguration {
    compose(selection.resolve(catalog))
}
