//! Project configuration discovery

use crate::config::HierarchicalConfigLoader;
use crate::error::{Error, Result};
use crate::types::FastmacConfigFile;
use camino::{Utf8Path, Utf8PathBuf};

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["fastmac.yaml", "fastmac.yml"];

/// Loaded FastMac configuration
#[derive(Debug, Clone)]
pub struct FastmacConfig {
    /// The merged configuration
    pub config: FastmacConfigFile,

    /// Project configuration file, when one was found
    pub config_path: Option<Utf8PathBuf>,

    /// Directory relative paths in the configuration resolve against
    pub working_dir: Utf8PathBuf,
}

impl FastmacConfig {
    /// Load configuration from the specified project file or search for one
    ///
    /// An explicit path must exist; a missing searched-for file just means
    /// defaults plus the global layer.
    pub fn load(path: Option<&Utf8Path>, loader: &HierarchicalConfigLoader) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config_not_found(p.as_str()));
                }
                Some(p.to_owned())
            }
            None => Self::find_config(&Self::current_dir()?),
        };

        let working_dir = match &config_path {
            Some(p) => p
                .parent()
                .filter(|d| !d.as_str().is_empty())
                .map(|d| d.to_owned())
                .unwrap_or_else(|| Utf8PathBuf::from(".")),
            None => Self::current_dir()?,
        };

        let config = loader.load(config_path.as_deref())?;

        Ok(Self {
            config,
            config_path,
            working_dir,
        })
    }

    /// Absolute or working-directory-relative path of the configured catalog
    pub fn catalog_path(&self) -> Utf8PathBuf {
        let path = Utf8Path::new(&self.config.catalog.path);
        if path.is_absolute() {
            path.to_owned()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Find a configuration file in `start` or its parent directories
    pub fn find_config(start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }

        None
    }

    fn current_dir() -> Result<Utf8PathBuf> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let root = utf8(temp.path());
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("fastmac.yaml"), "resolution:\n  policy: strict\n").unwrap();

        let found = FastmacConfig::find_config(&nested).unwrap();
        assert_eq!(found, root.join("fastmac.yaml"));
    }

    #[test]
    fn test_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let loader = HierarchicalConfigLoader::with_dir(utf8(temp.path()));
        let missing = utf8(temp.path()).join("nope.yaml");

        let result = FastmacConfig::load(Some(&missing), &loader);
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    #[serial]
    fn test_catalog_path_relative_to_config() {
        let temp = TempDir::new().unwrap();
        let root = utf8(temp.path());
        let project = root.join("fastmac.yaml");
        fs::write(&project, "catalog:\n  path: tools/catalog.yaml\n").unwrap();

        let loader = HierarchicalConfigLoader::with_dir(root.join("global"));
        let config = FastmacConfig::load(Some(&project), &loader).unwrap();
        assert_eq!(config.catalog_path(), root.join("tools/catalog.yaml"));
    }
}
