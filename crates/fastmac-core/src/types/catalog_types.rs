//! Catalog document types matching catalog.schema.json
//!
//! These mirror the shape the document store (or a static catalog file) hands
//! over: loosely typed, with `''` standing in for an absent value. They are
//! normalized into [`Tool`](super::Tool) before anything resolves against them.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog document (catalog.yaml / catalog.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Catalog format version
    #[serde(default = "default_catalog_version")]
    pub version: String,

    /// Category definitions
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Tool records
    #[serde(default)]
    pub tools: Vec<ToolRecord>,
}

fn default_catalog_version() -> String {
    "1.0".to_string()
}

impl Default for CatalogFile {
    fn default() -> Self {
        Self {
            version: default_catalog_version(),
            categories: Vec::new(),
            tools: Vec::new(),
        }
    }
}

/// Grouping label for tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: String,

    /// Display name
    #[serde(default = "default_category_name")]
    pub name: String,
}

fn default_category_name() -> String {
    "Unnamed Category".to_string()
}

/// How a tool record says it should be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Installed through the package manager
    #[default]
    Standard,
    /// Installed by an explicit shell command
    Custom,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Standard => write!(f, "standard"),
            ToolKind::Custom => write!(f, "custom"),
        }
    }
}

/// Raw tool record as stored in the catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Unique tool identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Category identifier
    #[serde(
        default,
        rename = "category",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<String>,

    /// Install kind
    #[serde(default, rename = "type")]
    pub kind: ToolKind,

    /// Package-manager identifier (standard tools)
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub brew_package: Option<String>,

    /// Install with the cask verb (GUI applications)
    #[serde(default)]
    pub cask: bool,

    /// Shell predicate that succeeds when the tool is already installed
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_command: Option<String>,

    /// Shell command that installs the tool (custom tools)
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub install_command: Option<String>,

    /// Identifiers of tools that must be installed first
    #[serde(default)]
    pub requires: Vec<String>,

    /// Commands run before the main install step
    #[serde(default)]
    pub pre_install: Vec<String>,

    /// Commands run after the main install step
    #[serde(default)]
    pub post_install: Vec<String>,
}

/// Treat missing, null, and blank strings alike
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
