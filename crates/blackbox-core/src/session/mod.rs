//! Session link creation
//!
//! A session is a shareable URL under which the composed blackbox would be
//! exposed. Nothing is stored: creating one only mints identifiers.

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SESSION_BASE_URL: &str = "https://blackbox.entropysource.com";

/// Produces fresh unique tokens.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Optional body sent by clients when creating a session.
///
/// Accepted for compatibility; its fields do not influence the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub mcp_server_ids: Vec<String>,
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

/// A freshly created session link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub request_id: String,
    pub url: String,
}

/// Mints session links under a base URL.
#[derive(Debug, Clone)]
pub struct SessionFactory<G: IdGenerator> {
    base_url: Url,
    ids: G,
}

impl SessionFactory<UuidGenerator> {
    pub fn with_defaults() -> anyhow::Result<Self> {
        let base_url = Url::parse(DEFAULT_SESSION_BASE_URL)?;
        Ok(Self::new(base_url, UuidGenerator))
    }
}

impl<G: IdGenerator> SessionFactory<G> {
    pub fn new(base_url: Url, ids: G) -> Self {
        Self { base_url, ids }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create a session: a request id plus `{base}/protocols/{session_id}`.
    pub fn create(&self) -> CreatedSession {
        let request_id = self.ids.next_id();
        let session_id = self.ids.next_id();
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}/protocols/{}", base, session_id);

        tracing::info!("Created session {} (request {})", session_id, request_id);
        CreatedSession { request_id, url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct SequentialIds {
        next: Cell<u32>,
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            let n = self.next.get();
            self.next.set(n + 1);
            format!("id-{}", n)
        }
    }

    #[test]
    fn test_create_uses_injected_ids() {
        let factory = SessionFactory::new(
            Url::parse("https://example.com").unwrap(),
            SequentialIds::default(),
        );

        let session = factory.create();

        assert_eq!(session.request_id, "id-0");
        assert_eq!(session.url, "https://example.com/protocols/id-1");
    }

    #[test]
    fn test_base_url_with_path_and_trailing_slash() {
        let factory = SessionFactory::new(
            Url::parse("https://example.com/app/").unwrap(),
            SequentialIds::default(),
        );

        assert_eq!(factory.create().url, "https://example.com/app/protocols/id-1");
    }

    #[test]
    fn test_default_factory_mints_unique_sessions() {
        let factory = SessionFactory::with_defaults().unwrap();
        let first = factory.create();
        let second = factory.create();

        assert!(first.url.starts_with("https://blackbox.entropysource.com/protocols/"));
        assert_ne!(first.url, second.url);
        assert_ne!(first.request_id, second.request_id);
    }

    #[test]
    fn test_created_session_json_shape() {
        let session = CreatedSession {
            request_id: "r".to_string(),
            url: "u".to_string(),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value, serde_json::json!({"requestId": "r", "url": "u"}));
    }

    #[test]
    fn test_session_request_is_lenient() {
        let request: SessionRequest = serde_json::from_str("{}").unwrap();
        assert!(request.prompt.is_none());
        assert!(request.mcp_server_ids.is_empty());

        let request: SessionRequest =
            serde_json::from_str(r#"{"prompt": "p", "mcpServerIds": ["a"], "ttlSeconds": 60}"#)
                .unwrap();
        assert_eq!(request.mcp_server_ids, vec!["a"]);
        assert_eq!(request.ttl_seconds, Some(60));
    }
}
