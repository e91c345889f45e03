//! Catalog document loading and saving
//!
//! Documents are validated against the embedded catalog schema before they are
//! deserialized, so structural mistakes surface with a JSON pointer to the
//! offending field.

use fastmac_core::error::{Error, Result};
use fastmac_core::schema::SchemaValidator;
use fastmac_core::types::CatalogFile;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Serialization format of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Parse and schema-check a catalog document
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<CatalogFile> {
    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => {
            if content.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_yaml_ng::from_str(content)?
            }
        }
    };

    SchemaValidator::global()?.validate(&value, "catalog")?;

    let file: CatalogFile = serde_json::from_value(value)?;
    debug!(
        "Parsed catalog document: {} categories, {} tools",
        file.categories.len(),
        file.tools.len()
    );
    Ok(file)
}

/// Read a catalog document from disk
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::catalog_not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;
    parse_catalog(&content, CatalogFormat::from_path(path))
}

/// Write a catalog document to disk in the format its extension implies
pub fn save_catalog_file(path: &Path, file: &CatalogFile) -> Result<()> {
    let content = match CatalogFormat::from_path(path) {
        CatalogFormat::Json => {
            let mut json = serde_json::to_string_pretty(file)?;
            json.push('\n');
            json
        }
        CatalogFormat::Yaml => serde_yaml_ng::to_string(file)?,
    };
    std::fs::write(path, content)?;
    debug!("Wrote catalog document to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.JSON")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.yaml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Yaml);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"tools": [{"id": "git", "brew_package": "git"}]}"#;
        let file = parse_catalog(json, CatalogFormat::Json).unwrap();
        assert_eq!(file.tools.len(), 1);
    }

    #[test]
    fn test_schema_error_surfaces() {
        let yaml = "tools:\n  - name: no id here\n";
        let err = parse_catalog(yaml, CatalogFormat::Yaml).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::CatalogNotFound { .. }));
    }
}
