//! Registry wire schema
//!
//! Mirrors the `io.modelcontextprotocol.registry` server-list format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

use crate::catalog::ServerDescriptor;

/// Paged server list returned by a registry search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerListResponse {
    pub total: usize,
    pub next_offset: Option<usize>,
    pub items: Vec<ServerRecord>,
}

impl ServerListResponse {
    /// A single, complete page.
    pub fn single_page(items: Vec<ServerRecord>) -> Self {
        Self {
            total: items.len(),
            next_offset: None,
            items,
        }
    }
}

/// A registry entry with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRecord {
    /// "namespace/name@version"
    pub id: String,
    pub score: f64,
    pub server: RegistryServer,
    #[serde(rename = "_meta")]
    pub meta: RegistryMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryServer {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub description: String,
    pub repository: RegistryRepository,
    pub version: semver::Version,
    #[serde(default)]
    pub remotes: Vec<RegistryRemote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRepository {
    pub url: Url,
    /// Hosting service, e.g. "github"
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRemote {
    /// Transport, e.g. "streamable-http"
    pub r#type: String,
    pub url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMeta {
    #[serde(rename = "io.modelcontextprotocol.registry/official")]
    pub official: OfficialMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialMeta {
    pub status: String,
    #[serde(with = "millis_rfc3339")]
    pub published_at: DateTime<Utc>,
    #[serde(with = "millis_rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub is_latest: bool,
}

/// RFC 3339 with millisecond precision and a `Z` suffix, as registries emit.
mod millis_rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

impl ServerRecord {
    /// Convert to a palette descriptor.
    ///
    /// The whole server block becomes the config fragment under `server`, the
    /// same shape the builtin palette uses.
    pub fn to_descriptor(&self) -> ServerDescriptor {
        let server = serde_json::to_value(&self.server).unwrap_or(Value::Null);

        ServerDescriptor {
            id: self.id.clone(),
            name: self.server.name.clone(),
            description: self.server.description.clone(),
            icon_url: self.server.icon.clone(),
            remote_url: self.server.remotes.first().map(|r| r.url.clone()),
            repository_url: Some(self.server.repository.url.clone()),
            config: json!({ "server": server }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": "com.example/demo@1.2.0",
        "score": 0.5,
        "server": {
            "$schema": "https://static.modelcontextprotocol.io/schemas/2025-09-29/server.schema.json",
            "name": "Demo MCP",
            "description": "Demo server",
            "repository": {"url": "https://github.com/example/demo", "source": "github"},
            "version": "1.2.0",
            "remotes": [{"type": "streamable-http", "url": "https://demo.example.com/mcp"}]
        },
        "_meta": {
            "io.modelcontextprotocol.registry/official": {
                "status": "active",
                "publishedAt": "2025-09-18T12:00:00.000Z",
                "updatedAt": "2025-10-03T08:45:00.000Z",
                "isLatest": true
            }
        }
    }"#;

    #[test]
    fn test_timestamps_keep_millisecond_format() {
        let record: ServerRecord = serde_json::from_str(RECORD).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        let official = &value["_meta"]["io.modelcontextprotocol.registry/official"];
        assert_eq!(official["publishedAt"], "2025-09-18T12:00:00.000Z");
        assert_eq!(official["updatedAt"], "2025-10-03T08:45:00.000Z");
    }

    #[test]
    fn test_record_parses_registry_format() {
        let record: ServerRecord = serde_json::from_str(RECORD).unwrap();

        assert_eq!(record.server.version, semver::Version::new(1, 2, 0));
        assert_eq!(record.server.remotes[0].r#type, "streamable-http");
        assert!(record.meta.official.is_latest);
        assert!(record.server.icon.is_none());
    }

    #[test]
    fn test_record_to_descriptor() {
        let record: ServerRecord = serde_json::from_str(RECORD).unwrap();
        let descriptor = record.to_descriptor();

        assert_eq!(descriptor.id, "com.example/demo@1.2.0");
        assert_eq!(descriptor.name, "Demo MCP");
        assert_eq!(
            descriptor.remote_url.unwrap().as_str(),
            "https://demo.example.com/mcp"
        );
        assert_eq!(descriptor.config["server"]["name"], "Demo MCP");
        assert_eq!(descriptor.config["server"]["version"], "1.2.0");
    }

    #[test]
    fn test_record_serializes_meta_key() {
        let record: ServerRecord = serde_json::from_str(RECORD).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert!(value["_meta"]["io.modelcontextprotocol.registry/official"]["publishedAt"].is_string());
        assert!(value["server"]["$schema"].is_string());
    }

    #[test]
    fn test_single_page_response() {
        let record: ServerRecord = serde_json::from_str(RECORD).unwrap();
        let response = ServerListResponse::single_page(vec![record]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["total"], 1);
        assert!(value["nextOffset"].is_null());
    }
}
