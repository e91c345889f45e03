//! Catalog providers
//!
//! Providers hand out immutable [`Catalog`] snapshots behind an `Arc`. A
//! resolution keeps the snapshot it started with; a refresh swaps in a new
//! one without touching snapshots already handed out.

use fastmac_core::error::Result;
use fastmac_core::types::CatalogFile;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::source::load_catalog_file;

/// Default time a cached snapshot stays fresh
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Source of validated catalog snapshots
pub trait CatalogProvider: Send + Sync {
    /// Current snapshot
    fn snapshot(&self) -> Result<Arc<Catalog>>;

    /// Where the catalog comes from, for messages
    fn describe(&self) -> String;
}

/// Reads and validates a catalog document on every call
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for FileCatalogProvider {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        debug!("Loading catalog from {}", self.path.display());
        let file = load_catalog_file(&self.path)?;
        Ok(Arc::new(Catalog::new(&file)?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves one fixed snapshot
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    catalog: Arc<Catalog>,
}

impl StaticCatalogProvider {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Validate a document and serve it
    pub fn from_file(file: &CatalogFile) -> Result<Self> {
        Ok(Self::new(Catalog::new(file)?))
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::clone(&self.catalog))
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}

struct CachedSnapshot {
    catalog: Arc<Catalog>,
    loaded_at: Instant,
}

/// Caches another provider's snapshot for a fixed time
///
/// When a refresh fails on I/O and an expired snapshot is still held, the
/// expired snapshot is served and the failure logged. A catalog that now
/// fails validation is always reported to the caller.
pub struct CachedCatalogProvider<P> {
    inner: P,
    ttl: Duration,
    cached: RwLock<Option<CachedSnapshot>>,
}

impl<P: CatalogProvider> CachedCatalogProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Drop the cached snapshot so the next call refreshes
    pub fn invalidate(&self) {
        let mut cached = self.cached.write().unwrap_or_else(|e| e.into_inner());
        if cached.take().is_some() {
            info!("Invalidated cached catalog for {}", self.inner.describe());
        }
    }

    fn fresh(&self) -> Option<Arc<Catalog>> {
        let cached = self.cached.read().unwrap_or_else(|e| e.into_inner());
        cached
            .as_ref()
            .filter(|c| c.loaded_at.elapsed() < self.ttl)
            .map(|c| Arc::clone(&c.catalog))
    }
}

impl<P: CatalogProvider> CatalogProvider for CachedCatalogProvider<P> {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.fresh() {
            debug!("Using cached catalog");
            return Ok(catalog);
        }

        let mut cached = self.cached.write().unwrap_or_else(|e| e.into_inner());

        // Another caller may have refreshed while we waited for the lock
        if let Some(c) = cached.as_ref().filter(|c| c.loaded_at.elapsed() < self.ttl) {
            return Ok(Arc::clone(&c.catalog));
        }

        match self.inner.snapshot() {
            Ok(catalog) => {
                *cached = Some(CachedSnapshot {
                    catalog: Arc::clone(&catalog),
                    loaded_at: Instant::now(),
                });
                Ok(catalog)
            }
            Err(e) => match cached.as_ref() {
                Some(stale) if e.is_transient() => {
                    warn!(
                        "Failed to refresh catalog from {}: {}. Using expired cache",
                        self.inner.describe(),
                        e
                    );
                    Ok(Arc::clone(&stale.catalog))
                }
                _ => Err(e),
            },
        }
    }

    fn describe(&self) -> String {
        format!("{} (cached)", self.inner.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastmac_core::error::Error;
    use fastmac_core::types::ToolRecord;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingProvider {
        loads: AtomicUsize,
        failing: AtomicBool,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                loads: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }
        }
    }

    impl CatalogProvider for CountingProvider {
        fn snapshot(&self) -> Result<Arc<Catalog>> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::catalog_not_found("backing store"));
            }
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            let file = CatalogFile {
                tools: vec![ToolRecord {
                    id: format!("tool{n}"),
                    brew_package: Some("pkg".into()),
                    ..Default::default()
                }],
                ..Default::default()
            };
            Ok(Arc::new(Catalog::new(&file)?))
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn test_cache_reuses_snapshot() {
        let cached = CachedCatalogProvider::new(CountingProvider::new());
        let first = cached.snapshot().unwrap();
        let second = cached.snapshot().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cached.inner.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_swaps_snapshot() {
        let cached = CachedCatalogProvider::new(CountingProvider::new());
        let first = cached.snapshot().unwrap();
        cached.invalidate();
        let second = cached.snapshot().unwrap();

        // The old snapshot is untouched
        assert!(first.contains("tool0"));
        assert!(second.contains("tool1"));
    }

    #[test]
    fn test_expired_cache_is_fallback() {
        let cached = CachedCatalogProvider::with_ttl(CountingProvider::new(), Duration::ZERO);
        let first = cached.snapshot().unwrap();

        cached.inner.failing.store(true, Ordering::SeqCst);
        let fallback = cached.snapshot().unwrap();
        assert!(Arc::ptr_eq(&first, &fallback));
    }

    #[test]
    fn test_failure_without_cache_propagates() {
        let provider = CountingProvider::new();
        provider.failing.store(true, Ordering::SeqCst);
        let cached = CachedCatalogProvider::new(provider);
        assert!(matches!(cached.snapshot(), Err(Error::CatalogNotFound { .. })));
    }

    #[test]
    fn test_invalid_catalog_is_not_masked_by_cache() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("catalog.yaml");
        std::fs::write(&path, "tools:\n  - id: git\n    brew_package: git\n").unwrap();

        let cached =
            CachedCatalogProvider::with_ttl(FileCatalogProvider::new(&path), Duration::ZERO);
        assert!(cached.snapshot().unwrap().contains("git"));

        std::fs::write(
            &path,
            "tools:\n  - id: git\n    brew_package: git\n    requires: [ghost]\n",
        )
        .unwrap();
        match cached.snapshot() {
            Err(Error::CatalogInvalid { problems }) => {
                assert_eq!(problems, vec!["tool 'git' requires unknown tool 'ghost'"]);
            }
            other => panic!("expected CatalogInvalid, got {:?}", other.map(|c| c.len())),
        }

        std::fs::remove_file(&path).unwrap();
        assert!(cached.snapshot().unwrap().contains("git"));
    }

    #[test]
    fn test_static_provider_shares_snapshot() {
        let file = CatalogFile {
            tools: vec![ToolRecord {
                id: "jq".into(),
                brew_package: Some("jq".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let provider = StaticCatalogProvider::from_file(&file).unwrap();
        assert!(Arc::ptr_eq(&provider.snapshot().unwrap(), &provider.snapshot().unwrap()));
        assert_eq!(provider.describe(), "in-memory catalog");
    }

    #[test]
    fn test_file_provider_missing_file() {
        let provider = FileCatalogProvider::new("/no/such/catalog.yaml");
        assert!(provider.snapshot().is_err());
        assert_eq!(provider.describe(), "/no/such/catalog.yaml");
    }
}
