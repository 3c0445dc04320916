//! Server catalog
//!
//! The catalog is the set of MCP servers a user can pick from. It is loaded
//! once per session by a [`CatalogProvider`] and never mutated afterwards.

pub mod builtin;
pub mod load;
pub mod provider;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub use load::{parse_catalog_json, read_catalog_file};
pub use provider::{BuiltinCatalog, CatalogProvider, FileCatalog, RegistryCatalog};

/// One composable MCP server and the config fragment used to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDescriptor {
    /// Identifier, unique within a catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description shown in the palette
    pub description: String,
    /// Icon reference, usually a path served by the web frontend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Remote endpoint, e.g. a streamable-http URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<Url>,
    /// Source repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<Url>,
    /// Opaque MCP server object snippet, echoed verbatim by the composer
    #[serde(default = "empty_config")]
    pub config: Value,
}

fn empty_config() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ServerDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon_url: None,
            remote_url: None,
            repository_url: None,
            config,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Ordered set of server descriptors indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    servers: Vec<ServerDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the given order.
    ///
    /// Providers are expected to hand out unique ids. If one does not, the
    /// first descriptor with a given id wins and the rest are dropped.
    pub fn new(descriptors: impl IntoIterator<Item = ServerDescriptor>) -> Self {
        let mut servers = Vec::new();
        let mut index = HashMap::new();

        for descriptor in descriptors {
            if index.contains_key(&descriptor.id) {
                tracing::warn!("Duplicate server id in catalog, ignoring: {}", descriptor.id);
                continue;
            }
            index.insert(descriptor.id.clone(), servers.len());
            servers.push(descriptor);
        }

        Self { servers, index }
    }

    /// The embedded palette catalog.
    pub fn builtin() -> Self {
        Self::new(builtin::builtin_servers())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ServerDescriptor> {
        self.index.get(id).map(|&i| &self.servers[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServerDescriptor> {
        self.servers.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn descriptors(&self) -> &[ServerDescriptor] {
        &self.servers
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ServerDescriptor;
    type IntoIter = std::slice::Iter<'a, ServerDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_keeps_order() {
        let catalog = Catalog::new(vec![
            ServerDescriptor::new("b", "B", json!({})),
            ServerDescriptor::new("a", "A", json!({})),
        ]);

        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_catalog_first_duplicate_wins() {
        let catalog = Catalog::new(vec![
            ServerDescriptor::new("a", "First", json!({"n": 1})),
            ServerDescriptor::new("a", "Second", json!({"n": 2})),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().name, "First");
    }

    #[test]
    fn test_catalog_lookup_missing() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("missing").is_none());
        assert!(!catalog.contains("missing"));
    }

    #[test]
    fn test_descriptor_deserializes_web_field_names() {
        let descriptor: ServerDescriptor = serde_json::from_value(json!({
            "id": "s1",
            "name": "Server One",
            "description": "demo",
            "iconUrl": "/s1.png",
            "remoteUrl": "https://example.com/mcp",
            "config": {"a": 1}
        }))
        .unwrap();

        assert_eq!(descriptor.icon_url.as_deref(), Some("/s1.png"));
        assert_eq!(
            descriptor.remote_url.as_ref().map(Url::as_str),
            Some("https://example.com/mcp")
        );
        assert!(descriptor.repository_url.is_none());
        assert_eq!(descriptor.config, json!({"a": 1}));
    }

    #[test]
    fn test_descriptor_missing_config_defaults_to_empty_object() {
        let descriptor: ServerDescriptor =
            serde_json::from_value(json!({"id": "s1", "name": "S", "description": ""})).unwrap();
        assert_eq!(descriptor.config, json!({}));
    }
}
