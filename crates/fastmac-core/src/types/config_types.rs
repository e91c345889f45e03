//! Configuration types for fastmac.yaml
//!
//! Every section is optional in a file; missing values fall back to the
//! embedded defaults.

use serde::{Deserialize, Serialize};

/// Complete FastMac configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FastmacConfigFile {
    /// Dependency resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Generated script settings
    #[serde(default)]
    pub script: ScriptConfig,

    /// Package manager used for standard tools
    #[serde(default)]
    pub package_manager: PackageManagerConfig,

    /// Catalog source settings
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// What to do with identifiers the catalog does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Fail the whole call with `UnknownTool`
    #[default]
    Strict,
    /// Skip the reference and record a warning
    Lenient,
}

impl std::fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionPolicy::Strict => write!(f, "strict"),
            ResolutionPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ResolutionPolicy::Strict),
            "lenient" => Ok(ResolutionPolicy::Lenient),
            other => Err(format!(
                "unknown resolution policy '{}' (expected strict or lenient)",
                other
            )),
        }
    }
}

/// Dependency resolution settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolutionConfig {
    /// Unknown identifier policy
    #[serde(default)]
    pub policy: ResolutionPolicy,
}

/// Generated script settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScriptConfig {
    /// Title written in the header comment
    #[serde(default = "default_title")]
    pub title: String,

    /// Interpreter for the shebang line
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Value `uname -s` must print for the script to proceed
    #[serde(default = "default_required_os")]
    pub required_os: String,

    /// Human-readable OS name for the guard message
    #[serde(default = "default_os_label")]
    pub os_label: String,

    /// Write the estimated install time into the header
    #[serde(default = "default_true")]
    pub include_estimate: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            shell: default_shell(),
            required_os: default_required_os(),
            os_label: default_os_label(),
            include_estimate: true,
        }
    }
}

fn default_title() -> String {
    "FastMac Setup Script".to_string()
}
fn default_shell() -> String {
    "/bin/bash".to_string()
}
fn default_required_os() -> String {
    "Darwin".to_string()
}
fn default_os_label() -> String {
    "macOS".to_string()
}
fn default_true() -> bool {
    true
}

/// Package manager used for standard tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageManagerConfig {
    /// Display name
    #[serde(default = "default_pm_name")]
    pub name: String,

    /// Executable probed for presence
    #[serde(default = "default_pm_command")]
    pub command: String,

    /// Install verb for regular packages
    #[serde(default = "default_install_verb")]
    pub install_verb: String,

    /// Install verb for GUI (cask) packages
    #[serde(default = "default_cask_verb")]
    pub cask_verb: String,

    /// Commands that install the package manager when absent
    #[serde(default = "default_bootstrap")]
    pub bootstrap: Vec<String>,

    /// Command that refreshes the package manager when present
    #[serde(default = "default_refresh")]
    pub refresh: String,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            name: default_pm_name(),
            command: default_pm_command(),
            install_verb: default_install_verb(),
            cask_verb: default_cask_verb(),
            bootstrap: default_bootstrap(),
            refresh: default_refresh(),
        }
    }
}

fn default_pm_name() -> String {
    "Homebrew".to_string()
}
fn default_pm_command() -> String {
    "brew".to_string()
}
fn default_install_verb() -> String {
    "install".to_string()
}
fn default_cask_verb() -> String {
    "install --cask".to_string()
}
fn default_bootstrap() -> Vec<String> {
    vec![
        r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#
            .to_string(),
        r#"if [ -x /opt/homebrew/bin/brew ]; then eval "$(/opt/homebrew/bin/brew shellenv)"; fi"#
            .to_string(),
    ]
}
fn default_refresh() -> String {
    "brew update".to_string()
}

/// Catalog source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Catalog file path, relative to the working directory
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// How long a loaded catalog snapshot stays fresh
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_catalog_path() -> String {
    "catalog.yaml".to_string()
}
fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}
