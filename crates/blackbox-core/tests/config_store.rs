use std::path::PathBuf;

use tempfile::TempDir;

use blackbox_core::config::store::ConfigStore;
use blackbox_core::config::{BlackboxConfig, CatalogSourceKind};
use blackbox_core::types::ConfigScope;

#[test]
fn load_missing_returns_default_config() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(
        ConfigScope::Global,
        &temp.path().join("config"),
        &temp.path().join("project"),
    );

    let config = store.load().unwrap();

    assert!(!store.exists());
    assert_eq!(config, BlackboxConfig::default());
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(
        ConfigScope::Project,
        &temp.path().join("config"),
        &temp.path().join("project"),
    );

    let mut config = BlackboxConfig::new();
    config.catalog.source = Some(CatalogSourceKind::File);
    config.catalog.path = Some(PathBuf::from("servers.json"));
    config.session.base_url = Some("https://sessions.example.com".to_string());

    store.save(&config).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, config);
    assert!(temp.path().join("project").join("blackbox.toml").exists());
}

#[test]
fn invalid_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join("blackbox.toml"), "[catalog]\nsource = \"file\"\n").unwrap();

    let store = ConfigStore::from_paths(ConfigScope::Project, &temp.path().join("config"), &project);
    let err = store.load().unwrap_err();

    assert!(format!("{:#}", err).contains("catalog.path"));
    assert!(err.to_string().contains("blackbox.toml"));
}
