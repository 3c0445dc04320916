use blackbox_core::config::{CatalogSource, ConfigScope};
use blackbox_core::context::AppContext;
use blackbox_core::selection::SelectionStore;
use tempfile::TempDir;

fn context(temp: &TempDir) -> AppContext {
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();

    AppContext::with_global_config_dir(
        project,
        temp.path().join("state"),
        temp.path().join("config"),
    )
}

#[test]
fn app_context_creates_from_paths() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    let state = temp.path().join("state");

    let ctx = AppContext::new(project.clone(), state.clone());

    assert_eq!(ctx.project_root(), &project);
    assert_eq!(ctx.state_dir(), &state);
}

#[test]
fn app_context_merges_global_and_project_config() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    std::fs::write(
        temp.path().join("config").join("blackbox.toml"),
        "[server]\nport = 4000\n\n[session]\nbase_url = \"https://global.example.com\"\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("project").join("blackbox.toml"),
        "[session]\nbase_url = \"https://project.example.com\"\n",
    )
    .unwrap();

    let config = ctx.load_config().unwrap();

    assert_eq!(config.server_port(), 4000);
    assert_eq!(
        config.session_base_url().unwrap().as_str(),
        "https://project.example.com/"
    );
}

#[test]
fn app_context_provides_config_store() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    let store = ctx.config_store(ConfigScope::Global);

    assert_eq!(
        store.config_path(),
        temp.path().join("config").join("blackbox.toml")
    );
    assert!(store.load().is_ok());
}

#[test]
fn app_context_selection_store_lives_in_state_dir() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    ctx.selection_store().save(&["s1".to_string()]).unwrap();

    assert!(temp.path().join("state").join("selection.json").exists());
    let manager = ctx.selection_manager().unwrap();
    assert_eq!(manager.selection().ids(), ["s1"]);
}

#[test]
fn app_context_resolves_relative_catalog_files() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    std::fs::write(
        temp.path().join("project").join("servers.json"),
        r#"[{"id": "local", "name": "Local", "description": "", "config": {}}]"#,
    )
    .unwrap();

    let catalog = ctx
        .load_catalog(&CatalogSource::parse("file:servers.json").unwrap())
        .unwrap();

    assert!(catalog.contains("local"));
}

#[test]
fn app_context_provides_session_factory() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    let config = ctx.load_config().unwrap();
    let session = ctx.session_factory(&config).unwrap().create();

    assert!(session.url.starts_with("https://blackbox.entropysource.com/protocols/"));
}

#[test]
fn app_context_project_layer_completes_global_catalog() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    std::fs::write(
        temp.path().join("config").join("blackbox.toml"),
        "[catalog]\npath = \"servers.json\"\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("project").join("blackbox.toml"),
        "[catalog]\nsource = \"file\"\n",
    )
    .unwrap();

    let config = ctx.load_config().unwrap();

    assert_eq!(
        config.catalog_source().unwrap(),
        CatalogSource::File(temp.path().join("config").join("servers.json"))
    );
}

#[test]
fn app_context_rejects_incomplete_merged_config() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    std::fs::write(
        temp.path().join("project").join("blackbox.toml"),
        "[catalog]\nsource = \"file\"\n",
    )
    .unwrap();

    let err = format!("{:#}", ctx.load_config().unwrap_err());
    assert!(err.contains("catalog.path"));
}

#[test]
fn app_context_recovers_from_corrupt_selection_file() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    std::fs::create_dir_all(temp.path().join("state")).unwrap();
    std::fs::write(temp.path().join("state").join("selection.json"), "{not json").unwrap();

    let mut manager = ctx.selection_manager().unwrap();
    assert!(manager.selection().is_empty());

    manager.add("s1").unwrap();

    let reloaded = ctx.selection_manager().unwrap();
    assert_eq!(reloaded.selection().ids(), ["s1"]);
}
