use axum::extract::FromRef;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blackbox_core::registry::{ServerRecord, builtin_records};
use blackbox_core::session::{SessionFactory, UuidGenerator};

use super::ServerConfig;

/// Where `/api/servers` takes its records from.
#[derive(Clone, Debug)]
pub enum RecordSource {
    Builtin,
    /// JSON array of registry records, re-read on every request
    File(PathBuf),
}

impl RecordSource {
    pub async fn load(&self) -> anyhow::Result<Vec<ServerRecord>> {
        match self {
            RecordSource::Builtin => Ok(builtin_records()),
            RecordSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read records: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse records: {}", path.display()))
            }
        }
    }
}

pub type SharedRecords = Arc<RecordSource>;
pub type SharedSessions = Arc<SessionFactory<UuidGenerator>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub records: SharedRecords,
    pub sessions: SharedSessions,
}

impl ServerState {
    pub fn new(config: ServerConfig, records: RecordSource) -> ServerState {
        let sessions = SessionFactory::new(config.session_base_url.clone(), UuidGenerator);
        ServerState {
            config,
            records: Arc::new(records),
            sessions: Arc::new(sessions),
        }
    }
}

impl FromRef<ServerState> for SharedRecords {
    fn from_ref(input: &ServerState) -> Self {
        input.records.clone()
    }
}

impl FromRef<ServerState> for SharedSessions {
    fn from_ref(input: &ServerState) -> Self {
        input.sessions.clone()
    }
}
