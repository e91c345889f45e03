//! Configuration loading and management

mod hierarchical_loader;
mod loader;

pub use hierarchical_loader::HierarchicalConfigLoader;
pub use loader::FastmacConfig;
