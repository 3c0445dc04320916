//! End-to-end selection and composition scenarios.

use serde_json::json;

use blackbox_core::catalog::{Catalog, ServerDescriptor};
use blackbox_core::compose::{COMBINED_NAME, compose, compose_selection};
use blackbox_core::registry::builtin_records;
use blackbox_core::selection::{MemorySelectionStore, SelectionManager, SelectionSet};

fn catalog() -> Catalog {
    Catalog::new(vec![
        ServerDescriptor::new("s1", "Server One", json!({"a": 1})),
        ServerDescriptor::new("s2", "Server Two", json!({"b": 2})),
    ])
}

#[test]
fn drop_order_drives_composition() {
    let catalog = catalog();
    let mut selection = SelectionSet::new();

    selection.add("s2");
    selection.add("s1");
    selection.add("s2");
    assert_eq!(selection.ids(), ["s2", "s1"]);

    let resolved = selection.resolve(&catalog);
    let ids: Vec<&str> = resolved.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1"]);

    let combined = compose(resolved);
    assert_eq!(combined.combined_servers, vec![json!({"b": 2}), json!({"a": 1})]);
}

#[test]
fn unknown_id_is_dropped_silently() {
    let catalog = catalog();
    let mut selection = SelectionSet::from_ids(["s2", "s1"]);
    let before = selection.resolve(&catalog).len();

    selection.add("missing");

    assert_eq!(selection.resolve(&catalog).len(), before);
    assert_eq!(selection.unresolved(&catalog), vec!["missing"]);
    assert_eq!(compose_selection(&selection, &catalog).len(), 2);
}

#[test]
fn selection_survives_catalog_arriving_late() {
    let store = MemorySelectionStore::new();
    let mut manager = SelectionManager::load(&store).unwrap();
    manager.add("s1").unwrap();

    // Catalog not fetched yet
    assert!(manager.resolve(&Catalog::empty()).is_empty());

    let reloaded = SelectionManager::load(&store).unwrap();
    assert_eq!(reloaded.resolve(&catalog()).len(), 1);
}

#[test]
fn registry_records_compose_as_server_blocks() {
    let catalog = Catalog::new(builtin_records().iter().map(|r| r.to_descriptor()));
    let selection = SelectionSet::from_ids(["com.atlassian/jira-mcp@0.5.1", "com.slack/mcp-slack@0.1.0"]);

    let combined = compose_selection(&selection, &catalog);

    assert_eq!(combined.name, COMBINED_NAME);
    assert_eq!(combined.combined_servers[0]["server"]["name"], "Jira Project MCP");
    assert_eq!(combined.combined_servers[1]["server"]["name"], "Slack Workspace MCP");
}
