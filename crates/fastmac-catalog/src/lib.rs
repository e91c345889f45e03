//! Tool catalog and install-script synthesis for FastMac
//!
//! This crate handles:
//! - Catalog loading, validation and lookup
//! - Catalog providers (file, static, TTL-cached snapshots)
//! - Dependency resolution into a deduplicated install order
//! - Rendering the resolved order into one idempotent shell script
//! - Install-time estimation
//! - Catalog editing that keeps the catalog invariants intact

pub mod catalog;
pub mod editor;
pub mod emitter;
pub mod estimate;
pub mod generator;
pub mod provider;
pub mod resolver;
pub mod source;

pub use catalog::{Catalog, CategoryListing, Selection};
pub use editor::CatalogEditor;
pub use emitter::{EmitOptions, ScriptEmitter};
pub use estimate::InstallEstimate;
pub use generator::{GeneratedScript, ScriptGenerator};
pub use provider::{
    CachedCatalogProvider, CatalogProvider, FileCatalogProvider, StaticCatalogProvider,
};
pub use resolver::{DependencyResolver, Resolution, ResolveWarning};
pub use source::{load_catalog_file, parse_catalog, save_catalog_file, CatalogFormat};
