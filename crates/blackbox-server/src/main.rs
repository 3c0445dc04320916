//! Blackbox Server - mock HTTP API
//!
//! Serves the registry server list at `/api/servers` and mints session links
//! at `/api/user`.

mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use blackbox_core::context::AppContext;

use server::{RecordSource, RequestsLoggingLevel, ServerConfig, run_server};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Port to listen on (default: [server].port or 3001)
    #[clap(long)]
    pub port: Option<u16>,

    /// Address to bind (default: [server].host or 127.0.0.1)
    #[clap(long)]
    pub host: Option<String>,

    /// Base URL for created session links
    #[clap(long)]
    pub session_base_url: Option<Url>,

    /// JSON array of registry records to serve instead of the built-in list
    #[clap(long)]
    pub records: Option<PathBuf>,

    #[clap(long, value_enum, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

impl CliArgs {
    fn apply(self, config: &mut ServerConfig) -> RecordSource {
        config.requests_logging_level = self.logging_level;
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(url) = self.session_base_url {
            config.session_base_url = url;
        }
        match self.records {
            Some(path) => RecordSource::File(path),
            None => RecordSource::Builtin,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blackbox_server=debug,blackbox_core=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli_args = CliArgs::parse();

    let blackbox_config = AppContext::with_defaults()?.load_config()?;
    let mut config = ServerConfig::from_blackbox(&blackbox_config)?;
    let records = cli_args.apply(&mut config);

    if !matches!(config.session_base_url.scheme(), "http" | "https") {
        anyhow::bail!(
            "--session-base-url must be an http(s) URL, got {}",
            config.session_base_url
        );
    }

    tracing::info!(
        "Session links under {}, records from {:?}",
        config.session_base_url,
        records
    );
    run_server(config, records).await
}
