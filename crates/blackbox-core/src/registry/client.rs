//! HTTP client for registry search endpoints.

use anyhow::Context;
use url::Url;

use super::ServerListResponse;

const USER_AGENT: &str = concat!("blackbox/", env!("CARGO_PKG_VERSION"));

/// Fetches server lists from a registry endpoint.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
}

impl RegistryClient {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// GET the server list at `url`.
    pub async fn fetch(&self, url: &Url) -> anyhow::Result<ServerListResponse> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch server list from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch server list: HTTP {} from {}",
                response.status(),
                url
            );
        }

        response
            .json::<ServerListResponse>()
            .await
            .context("Failed to parse server list response")
    }
}
