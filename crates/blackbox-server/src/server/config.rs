use url::Url;

use blackbox_core::config::BlackboxConfig;

use super::RequestsLoggingLevel;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub host: String,
    pub port: u16,
    pub session_base_url: Url,
}

impl ServerConfig {
    /// Server settings from the `[server]` and `[session]` sections.
    pub fn from_blackbox(config: &BlackboxConfig) -> anyhow::Result<Self> {
        Ok(ServerConfig {
            requests_logging_level: RequestsLoggingLevel::default(),
            host: config.server_host().to_string(),
            port: config.server_port(),
            session_base_url: config.session_base_url()?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_config() {
        let config = ServerConfig::from_blackbox(&BlackboxConfig::default()).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3001");
        assert_eq!(config.requests_logging_level, RequestsLoggingLevel::Path);
        assert_eq!(
            config.session_base_url.as_str(),
            "https://blackbox.entropysource.com/"
        );
    }
}
