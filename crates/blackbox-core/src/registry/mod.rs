//! MCP registry records
//!
//! Wire types for the registry server-list format, the demo records served by
//! the mock API, and the HTTP client used to fetch a remote list.

pub mod builtin;
pub mod client;
pub mod schema;

pub use builtin::builtin_records;
pub use client::RegistryClient;
pub use schema::{
    OfficialMeta, RegistryMeta, RegistryRemote, RegistryRepository, RegistryServer,
    ServerListResponse, ServerRecord,
};

/// Upper bound on records returned by a single search.
pub const MAX_RESULTS: usize = 20;

/// Return the top `top_k` records, capped at [`MAX_RESULTS`].
///
/// Records are assumed to be sorted by score already.
pub fn search(records: &[ServerRecord], top_k: usize) -> Vec<ServerRecord> {
    let count = top_k.min(MAX_RESULTS).min(records.len());
    records[..count].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_caps_at_record_count() {
        let records = builtin_records();
        let results = search(&records, MAX_RESULTS);
        assert_eq!(results.len(), records.len());
    }

    #[test]
    fn test_search_respects_top_k() {
        let records = builtin_records();
        let results = search(&records, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, records[0].id);
    }

    #[test]
    fn test_search_caps_at_max_results() {
        let record = builtin_records().remove(0);
        let records = vec![record; MAX_RESULTS + 5];
        assert_eq!(search(&records, 100).len(), MAX_RESULTS);
    }
}
