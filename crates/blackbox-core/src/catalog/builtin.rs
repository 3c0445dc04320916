//! Embedded palette servers.

use serde_json::json;
use url::Url;

use super::ServerDescriptor;

pub const SERVER_SCHEMA_URL: &str =
    "https://static.modelcontextprotocol.io/schemas/2025-09-29/server.schema.json";

/// Servers shown in the palette when no other catalog source is configured.
pub fn builtin_servers() -> Vec<ServerDescriptor> {
    let remote = "https://server.smithery.ai/@KaranThink41/official-gdrive-mcp/mcp";
    let description = "Browse, search, and manage files in Google Drive via MCP.";

    let mut gdrive = ServerDescriptor::new(
        "official-gdrive",
        "Google Drive (Official)",
        json!({
            "server": {
                "$schema": SERVER_SCHEMA_URL,
                "name": "ai.smithery/official-gdrive-mcp",
                "description": description,
                "remotes": [
                    {
                        "type": "streamable-http",
                        "url": remote,
                    }
                ],
            }
        }),
    )
    .with_description(description);

    gdrive.remote_url = Url::parse(remote).ok();
    gdrive.repository_url = Url::parse("https://github.com/KaranThink41/official-gdrive-mcp").ok();

    vec![gdrive]
}
