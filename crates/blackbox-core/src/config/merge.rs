//! Configuration layer merging logic
//!
//! Global -> Project. Relative catalog paths are anchored to the directory
//! of the file that declared them before the layers are merged.

use std::path::Path;

use super::schema::BlackboxConfig;

/// Merge the global and project layers.
///
/// # Arguments
/// * `global` - Configuration from `<config_dir>/blackbox/blackbox.toml`
/// * `global_dir` - Directory of the global file
/// * `project` - Configuration from `./blackbox.toml`
/// * `project_root` - Directory of the project file
pub fn merge_configs(
    global: Option<BlackboxConfig>,
    global_dir: &Path,
    project: Option<BlackboxConfig>,
    project_root: &Path,
) -> BlackboxConfig {
    let mut merged = global
        .map(|config| anchor_paths(config, global_dir))
        .unwrap_or_default();

    if let Some(project) = project {
        merged.merge(anchor_paths(project, project_root));
    }

    merged
}

fn anchor_paths(mut config: BlackboxConfig, base: &Path) -> BlackboxConfig {
    if let Some(path) = config.catalog.path.take() {
        config.catalog.path = Some(if path.is_relative() {
            base.join(path)
        } else {
            path
        });
    }
    config
}
