//! Demo registry records served by the mock API.

use super::ServerRecord;

const REGISTRY_SERVERS_JSON: &str = include_str!("../../data/registry_servers.json");

/// The embedded registry records, sorted by score.
pub fn builtin_records() -> Vec<ServerRecord> {
    match serde_json::from_str(REGISTRY_SERVERS_JSON) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Embedded registry records are invalid: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_records_parse() {
        let records = builtin_records();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "com.slack/mcp-slack@0.1.0",
                "com.google/drive-mcp@0.2.0",
                "com.atlassian/jira-mcp@0.5.1",
            ]
        );
    }

    #[test]
    fn test_builtin_records_sorted_by_score() {
        let records = builtin_records();
        assert!(records.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
