//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Global config (~/.fastmac/config.yaml)
//! 3. Project config (fastmac.yaml, found by walking up from the working directory)
//! 4. Environment variables (FASTMAC_* prefix)
//! 5. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{FastmacConfigFile, ResolutionPolicy};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_json::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Directory holding the global config.yaml
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at ~/.fastmac
    pub fn new() -> Result<Self> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;
        Ok(Self {
            config_dir: home.join(".fastmac"),
        })
    }

    /// Create a loader with a custom global config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the global config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Merge defaults, the global file and an optional project file, then apply env overrides
    pub fn load(&self, project_file: Option<&Utf8Path>) -> Result<FastmacConfigFile> {
        let mut merged = Self::load_embedded_value("defaults.yaml")?;

        let global_path = self.config_dir.join("config.yaml");
        if global_path.exists() {
            debug!("Merging global config from {}", global_path);
            merge_values(&mut merged, Self::load_yaml_value(&global_path)?);
        }

        if let Some(path) = project_file {
            debug!("Merging project config from {}", path);
            merge_values(&mut merged, Self::load_yaml_value(path)?);
        }

        let config: FastmacConfigFile = serde_json::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to apply configuration: {}", e)))?;

        Self::apply_env_overrides(config)
    }

    /// Load an embedded configuration file as a generic value
    fn load_embedded_value(filename: &str) -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file as a generic value; an empty file is an empty mapping
    fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        if content.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: FastmacConfigFile) -> Result<FastmacConfigFile> {
        if let Ok(val) = env::var("FASTMAC_POLICY") {
            config.resolution.policy = val
                .parse::<ResolutionPolicy>()
                .map_err(|e| Error::invalid_config(format!("FASTMAC_POLICY: {}", e)))?;
        }

        if let Ok(val) = env::var("FASTMAC_CATALOG") {
            config.catalog.path = val;
        }

        if let Ok(val) = env::var("FASTMAC_REQUIRED_OS") {
            config.script.required_os = val;
        }

        if let Ok(val) = env::var("FASTMAC_CACHE_TTL_SECS") {
            config.catalog.cache_ttl_secs = val.parse().map_err(|_| {
                Error::invalid_config("FASTMAC_CACHE_TTL_SECS must be a valid number")
            })?;
        }

        Ok(config)
    }
}

/// Recursively overlay `overlay` onto `base`; mappings merge, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        // `section:` with nothing under it keeps the lower layer
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}
