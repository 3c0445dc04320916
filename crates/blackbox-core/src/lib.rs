//! Blackbox Core Library
//!
//! Provides the domain logic for composing several MCP servers into one
//! combined client configuration: the server catalog, the user's selection,
//! the composer, and session link creation.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod context;
pub mod registry;
pub mod selection;
pub mod session;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Catalog
    pub use crate::catalog::{
        BuiltinCatalog, Catalog, CatalogProvider, FileCatalog, RegistryCatalog, ServerDescriptor,
    };

    // Selection
    pub use crate::selection::{
        JsonSelectionStore, MemorySelectionStore, SelectionManager, SelectionSet, SelectionStore,
    };

    // Composer
    pub use crate::compose::{CombinedConfiguration, compose, compose_selection};

    // Sessions
    pub use crate::session::{CreatedSession, IdGenerator, SessionFactory, UuidGenerator};

    // Configuration
    pub use crate::config::{BlackboxConfig, CatalogSource, ConfigScope, ConfigStore};
    pub use crate::context::AppContext;

    // Registry
    pub use crate::registry::{ServerListResponse, ServerRecord};
}
