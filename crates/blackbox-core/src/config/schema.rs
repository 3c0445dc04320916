//! Configuration schema for blackbox.toml
//!
//! Every field is optional so that a project file can override single values
//! of the global file. Effective values are read through the accessor methods,
//! which apply defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::session::DEFAULT_SESSION_BASE_URL;

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3001;

/// Root configuration structure for blackbox.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlackboxConfig {
    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub server: ServerSection,
}

/// Where the palette catalog comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    /// builtin, file or registry (defaults to builtin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CatalogSourceKind>,

    /// JSON catalog path, for source = "file"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Registry search endpoint, for source = "registry"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSourceKind {
    Builtin,
    File,
    Registry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Base URL session links are minted under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Resolved catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
    Registry(Url),
}

impl CatalogSource {
    /// Parse a command-line catalog spec.
    ///
    /// Accepts `builtin`, `file:<path>`, or an `http(s)://` registry URL.
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        if spec == "builtin" {
            return Ok(CatalogSource::Builtin);
        }
        if let Some(path) = spec.strip_prefix("file:") {
            if path.is_empty() {
                anyhow::bail!("Catalog file path is empty");
            }
            return Ok(CatalogSource::File(PathBuf::from(path)));
        }
        if spec.starts_with("http://") || spec.starts_with("https://") {
            let url = Url::parse(spec)
                .map_err(|e| anyhow::anyhow!("Invalid registry URL '{}': {}", spec, e))?;
            return Ok(CatalogSource::Registry(url));
        }
        anyhow::bail!(
            "Unknown catalog source: {}. Use 'builtin', 'file:<path>' or a registry URL",
            spec
        )
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Builtin => write!(f, "builtin"),
            CatalogSource::File(path) => write!(f, "file:{}", path.display()),
            CatalogSource::Registry(url) => write!(f, "{}", url),
        }
    }
}

impl BlackboxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` on top of this config, field by field.
    pub fn merge(&mut self, other: BlackboxConfig) {
        if other.catalog.source.is_some() {
            self.catalog.source = other.catalog.source;
        }
        if other.catalog.path.is_some() {
            self.catalog.path = other.catalog.path;
        }
        if other.catalog.url.is_some() {
            self.catalog.url = other.catalog.url;
        }
        if other.session.base_url.is_some() {
            self.session.base_url = other.session.base_url;
        }
        if other.server.host.is_some() {
            self.server.host = other.server.host;
        }
        if other.server.port.is_some() {
            self.server.port = other.server.port;
        }
    }

    /// Effective catalog source.
    pub fn catalog_source(&self) -> anyhow::Result<CatalogSource> {
        match self.catalog.source.unwrap_or(CatalogSourceKind::Builtin) {
            CatalogSourceKind::Builtin => Ok(CatalogSource::Builtin),
            CatalogSourceKind::File => {
                let path = self
                    .catalog
                    .path
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("File catalog requires 'catalog.path'"))?;
                Ok(CatalogSource::File(path))
            }
            CatalogSourceKind::Registry => {
                let url = self
                    .catalog
                    .url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Registry catalog requires 'catalog.url'"))?;
                let url = Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("Invalid 'catalog.url' '{}': {}", url, e))?;
                Ok(CatalogSource::Registry(url))
            }
        }
    }

    /// Effective session base URL.
    pub fn session_base_url(&self) -> anyhow::Result<Url> {
        let raw = self
            .session
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_SESSION_BASE_URL);
        let url = Url::parse(raw)
            .map_err(|e| anyhow::anyhow!("Invalid 'session.base_url' '{}': {}", raw, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("'session.base_url' must be an http(s) URL, got '{}'", raw);
        }
        Ok(url)
    }

    pub fn server_host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_SERVER_HOST)
    }

    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Validate configuration after parsing
    pub fn validate(&self) -> anyhow::Result<()> {
        self.catalog_source()?;
        self.session_base_url()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BlackboxConfig::new();

        assert_eq!(config.catalog_source().unwrap(), CatalogSource::Builtin);
        assert_eq!(
            config.session_base_url().unwrap().as_str(),
            "https://blackbox.entropysource.com/"
        );
        assert_eq!(config.server_host(), DEFAULT_SERVER_HOST);
        assert_eq!(config.server_port(), DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut global = BlackboxConfig::new();
        global.catalog.source = Some(CatalogSourceKind::File);
        global.catalog.path = Some(PathBuf::from("/global/servers.json"));
        global.server.port = Some(4000);

        let mut project = BlackboxConfig::new();
        project.catalog.path = Some(PathBuf::from("servers.json"));

        global.merge(project);

        assert_eq!(global.catalog.source, Some(CatalogSourceKind::File));
        assert_eq!(global.catalog.path, Some(PathBuf::from("servers.json")));
        assert_eq!(global.server_port(), 4000);
    }

    #[test]
    fn test_file_source_requires_path() {
        let mut config = BlackboxConfig::new();
        config.catalog.source = Some(CatalogSourceKind::File);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_registry_source_requires_valid_url() {
        let mut config = BlackboxConfig::new();
        config.catalog.source = Some(CatalogSourceKind::Registry);
        assert!(config.validate().is_err());

        config.catalog.url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.catalog.url = Some("http://127.0.0.1:3001/api/servers".to_string());
        assert!(matches!(
            config.catalog_source().unwrap(),
            CatalogSource::Registry(_)
        ));
    }

    #[test]
    fn test_session_base_url_must_be_http() {
        let mut config = BlackboxConfig::new();
        config.session.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_catalog_source_spec() {
        assert_eq!(CatalogSource::parse("builtin").unwrap(), CatalogSource::Builtin);
        assert_eq!(
            CatalogSource::parse("file:servers.json").unwrap(),
            CatalogSource::File(PathBuf::from("servers.json"))
        );
        assert!(matches!(
            CatalogSource::parse("https://registry.example.com/api/servers").unwrap(),
            CatalogSource::Registry(_)
        ));
        assert!(CatalogSource::parse("file:").is_err());
        assert!(CatalogSource::parse("registry").is_err());
    }
}
