//! Normalized tool model used by resolution and emission

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::catalog_types::{ToolKind, ToolRecord};
use crate::shell::default_check_command;

/// How a tool gets installed
///
/// Closed over the two install kinds so every renderer handles both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum InstallMethod {
    /// Package-manager install of `package`, with the cask verb when `cask` is set
    Package { package: String, cask: bool },
    /// Explicit shell command
    Custom { command: String },
}

impl InstallMethod {
    /// The record kind this method came from
    pub fn kind(&self) -> ToolKind {
        match self {
            InstallMethod::Package { .. } => ToolKind::Standard,
            InstallMethod::Custom { .. } => ToolKind::Custom,
        }
    }

    pub fn is_cask(&self) -> bool {
        matches!(self, InstallMethod::Package { cask: true, .. })
    }
}

/// One installable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique identifier
    pub id: String,

    /// Human-readable label
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Category this tool is listed under
    pub category_id: Option<String>,

    /// Install method
    pub install: InstallMethod,

    /// Probe that succeeds when the tool is already present
    pub check_command: String,

    /// Tools that must be installed first, in declared order
    pub requires: Vec<String>,

    /// Commands emitted before the main install step
    pub pre_install: Vec<String>,

    /// Commands emitted after the main install step
    pub post_install: Vec<String>,
}

impl Tool {
    /// Normalize a raw record
    ///
    /// Blank list entries are dropped. Every problem found is returned rather
    /// than just the first, so catalog validation can report them together.
    /// References to other tools are not checked here; that needs the whole catalog.
    pub fn from_record(record: &ToolRecord) -> Result<Self, Vec<String>> {
        let mut problems = Vec::new();
        let id = record.id.trim().to_string();

        if id.is_empty() {
            problems.push("tool with an empty id".to_string());
        }

        let label = if id.is_empty() { "<unnamed>" } else { id.as_str() };

        let install = match record.kind {
            ToolKind::Standard => match non_empty(&record.brew_package) {
                Some(package) => Some(InstallMethod::Package {
                    package,
                    cask: record.cask,
                }),
                None => {
                    problems.push(format!(
                        "tool '{}' is a standard tool but has no brew_package",
                        label
                    ));
                    None
                }
            },
            // install_command wins even when brew_package is also set
            ToolKind::Custom => match non_empty(&record.install_command) {
                Some(command) => Some(InstallMethod::Custom { command }),
                None => {
                    problems.push(format!(
                        "tool '{}' is a custom tool but has no install_command",
                        label
                    ));
                    None
                }
            },
        };

        let requires = non_blank(&record.requires);
        let mut seen = HashSet::new();
        for dep in &requires {
            if dep == &id {
                problems.push(format!("tool '{}' requires itself", label));
            } else if !seen.insert(dep.as_str()) {
                problems.push(format!("tool '{}' lists '{}' in requires more than once", label, dep));
            }
        }

        match install {
            Some(install) if problems.is_empty() => Ok(Self {
                name: if record.name.trim().is_empty() {
                    id.clone()
                } else {
                    record.name.trim().to_string()
                },
                description: record.description.trim().to_string(),
                category_id: non_empty(&record.category_id),
                install,
                check_command: non_empty(&record.check_command)
                    .unwrap_or_else(|| default_check_command(&id)),
                requires,
                pre_install: non_blank(&record.pre_install),
                post_install: non_blank(&record.post_install),
                id,
            }),
            _ => Err(problems),
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.install.kind()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
