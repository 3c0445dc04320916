//! Configuration management
//!
//! Two scopes are supported:
//! - Global: `<config_dir>/blackbox/blackbox.toml`
//! - Project: `./blackbox.toml`, overriding global values field by field

pub mod merge;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use merge::merge_configs;
pub use parser::{
    parse_blackbox_toml, parse_blackbox_toml_layer, parse_blackbox_toml_str, to_toml,
};
pub use paths::config_path_for_scope;
pub use schema::{
    BlackboxConfig, CatalogSection, CatalogSource, CatalogSourceKind, ServerSection,
    SessionSection,
};
pub use store::ConfigStore;

pub use crate::types::ConfigScope;
