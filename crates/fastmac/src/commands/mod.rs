//! Command implementations

pub mod catalog;
pub mod estimate;
pub mod generate;
pub mod info;
pub mod list;
pub mod resolve;
pub mod search;
pub mod validate;
pub mod version;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use fastmac_catalog::{CachedCatalogProvider, Catalog, CatalogProvider, FileCatalogProvider};
use fastmac_core::types::ResolutionPolicy;
use fastmac_core::{FastmacConfig, HierarchicalConfigLoader};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::cli::PolicyArgs;

/// Configuration and catalog access shared by every command
pub struct CommandContext {
    pub config: FastmacConfig,
    catalog_path: Utf8PathBuf,
    provider: CachedCatalogProvider<FileCatalogProvider>,
}

impl CommandContext {
    /// Load configuration; `catalog` overrides the configured catalog path
    pub fn load(config: Option<&Utf8Path>, catalog: Option<&Utf8Path>) -> Result<Self> {
        let loader = HierarchicalConfigLoader::new().context("Failed to locate config directory")?;
        let config = FastmacConfig::load(config, &loader).context("Failed to load configuration")?;

        let catalog_path = match catalog {
            Some(path) => path.to_owned(),
            None => config.catalog_path(),
        };
        debug!("Using catalog {}", catalog_path);

        let provider = CachedCatalogProvider::with_ttl(
            FileCatalogProvider::new(catalog_path.as_std_path()),
            Duration::from_secs(config.config.catalog.cache_ttl_secs),
        );

        Ok(Self {
            config,
            catalog_path,
            provider,
        })
    }

    pub fn catalog_path(&self) -> &Utf8Path {
        &self.catalog_path
    }

    /// Validated catalog snapshot
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        self.provider
            .snapshot()
            .with_context(|| format!("Failed to load catalog from {}", self.catalog_path))
    }

    /// Configured policy, overridden by --lenient / --strict
    pub fn policy(&self, args: &PolicyArgs) -> ResolutionPolicy {
        if args.lenient {
            ResolutionPolicy::Lenient
        } else if args.strict {
            ResolutionPolicy::Strict
        } else {
            self.config.config.resolution.policy
        }
    }
}
