//! Catalog editing with write-time invariant checks

use fastmac_core::error::{Error, Result};
use fastmac_core::types::{CatalogFile, Category, Tool, ToolRecord};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::Catalog;
use crate::source::{load_catalog_file, save_catalog_file};

/// Mutable catalog document that refuses edits leaving it invalid
#[derive(Debug, Clone)]
pub struct CatalogEditor {
    path: Option<PathBuf>,
    file: CatalogFile,
}

impl CatalogEditor {
    /// Edit a document held in memory
    pub fn new(file: CatalogFile) -> Self {
        Self { path: None, file }
    }

    /// Load a document for editing; a missing file starts an empty catalog
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = if path.exists() {
            load_catalog_file(&path)?
        } else {
            info!("Starting new catalog at {}", path.display());
            CatalogFile::default()
        };
        Ok(Self {
            path: Some(path),
            file,
        })
    }

    pub fn file(&self) -> &CatalogFile {
        &self.file
    }

    pub fn into_file(self) -> CatalogFile {
        self.file
    }

    /// Validated view of the current document
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::new(&self.file)
    }

    /// Add a category or rename an existing one
    pub fn upsert_category(&mut self, category: Category) -> Result<()> {
        let id = category.id.trim();
        if id.is_empty() {
            return Err(Error::catalog_invalid(vec!["category with an empty id".into()]));
        }
        let category = Category {
            id: id.to_string(),
            name: category.name.trim().to_string(),
        };

        match self.file.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.file.categories.push(category),
        }
        Ok(())
    }

    /// Remove a category that no tool is filed under
    pub fn remove_category(&mut self, id: &str) -> Result<Category> {
        let position = self
            .file
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::catalog_invalid(vec![format!("category '{}' does not exist", id)]))?;

        let members: Vec<&str> = self
            .file
            .tools
            .iter()
            .filter(|t| t.category_id.as_deref() == Some(id))
            .map(|t| t.id.as_str())
            .collect();
        if !members.is_empty() {
            return Err(Error::catalog_invalid(vec![format!(
                "category '{}' still has tools: {}",
                id,
                members.join(", ")
            )]));
        }

        Ok(self.file.categories.remove(position))
    }

    /// Add a tool or replace one with the same id
    ///
    /// Rejected when the record is incomplete for its kind, names a
    /// prerequisite that does not exist, or would close a dependency cycle.
    pub fn upsert_tool(&mut self, mut record: ToolRecord) -> Result<()> {
        let tool = Tool::from_record(&record).map_err(Error::catalog_invalid)?;
        record.id = tool.id.clone();

        let missing: Vec<String> = tool
            .requires
            .iter()
            .filter(|dep| !self.file.tools.iter().any(|t| t.id == **dep))
            .map(|dep| format!("tool '{}' requires unknown tool '{}'", tool.id, dep))
            .collect();
        if !missing.is_empty() {
            return Err(Error::catalog_invalid(missing));
        }

        let mut candidate = self.file.clone();
        match candidate.tools.iter_mut().find(|t| t.id == tool.id) {
            Some(existing) => *existing = record,
            None => candidate.tools.push(record),
        }

        Catalog::new(&candidate)?.check_acyclic()?;
        self.file = candidate;
        Ok(())
    }

    /// Remove a tool that nothing requires
    pub fn remove_tool(&mut self, id: &str) -> Result<ToolRecord> {
        let position = self
            .file
            .tools
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::unknown_tool(id))?;

        let dependents: Vec<&str> = self
            .file
            .tools
            .iter()
            .filter(|t| t.requires.iter().any(|r| r == id))
            .map(|t| t.id.as_str())
            .collect();
        if !dependents.is_empty() {
            return Err(Error::catalog_invalid(vec![format!(
                "tool '{}' is required by: {}",
                id,
                dependents.join(", ")
            )]));
        }

        Ok(self.file.tools.remove(position))
    }

    /// Write back to the file this editor was opened from
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Err(Error::invalid_config("catalog has no file to save to")),
        }
    }

    /// Write to `path`, in the format its extension implies
    pub fn save_to(&self, path: &Path) -> Result<()> {
        save_catalog_file(path, &self.file)?;
        info!("Saved catalog to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastmac_core::types::ToolKind;
    use tempfile::TempDir;

    fn package(id: &str, category: Option<&str>, requires: &[&str]) -> ToolRecord {
        ToolRecord {
            id: id.into(),
            category_id: category.map(Into::into),
            brew_package: Some(id.into()),
            requires: requires.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn editor() -> CatalogEditor {
        let mut editor = CatalogEditor::new(CatalogFile::default());
        editor
            .upsert_category(Category {
                id: "vcs".into(),
                name: "Version Control".into(),
            })
            .unwrap();
        editor.upsert_tool(package("git", Some("vcs"), &[])).unwrap();
        editor.upsert_tool(package("gh", Some("vcs"), &["git"])).unwrap();
        editor
    }

    #[test]
    fn test_requires_must_exist() {
        let mut editor = editor();
        let err = editor.upsert_tool(package("lazygit", None, &["tig"])).unwrap_err();
        assert!(err.to_string().contains("requires unknown tool 'tig'"));
        assert_eq!(editor.file().tools.len(), 2);
    }

    #[test]
    fn test_kind_fields_checked() {
        let mut editor = editor();
        let record = ToolRecord {
            id: "script".into(),
            kind: ToolKind::Custom,
            ..Default::default()
        };
        assert!(matches!(
            editor.upsert_tool(record),
            Err(Error::CatalogInvalid { .. })
        ));
    }

    #[test]
    fn test_cycle_rejected_on_write() {
        let mut editor = editor();
        let err = editor.upsert_tool(package("git", Some("vcs"), &["gh"])).unwrap_err();
        assert!(matches!(err, Error::CycleDetected { .. }));
        assert!(editor.file().tools[0].requires.is_empty());
    }

    #[test]
    fn test_upsert_replaces() {
        let mut editor = editor();
        let mut record = package("gh", Some("vcs"), &["git"]);
        record.name = "GitHub CLI".into();
        editor.upsert_tool(record).unwrap();
        assert_eq!(editor.file().tools.len(), 2);
        assert_eq!(editor.catalog().unwrap().lookup_tool("gh").unwrap().name, "GitHub CLI");
    }

    #[test]
    fn test_remove_category_with_tools_rejected() {
        let mut editor = editor();
        let err = editor.remove_category("vcs").unwrap_err();
        assert!(err.to_string().contains("still has tools: git, gh"));

        editor.remove_tool("gh").unwrap();
        editor.remove_tool("git").unwrap();
        assert_eq!(editor.remove_category("vcs").unwrap().id, "vcs");
    }

    #[test]
    fn test_remove_required_tool_rejected() {
        let mut editor = editor();
        let err = editor.remove_tool("git").unwrap_err();
        assert!(err.to_string().contains("required by: gh"));
        assert!(matches!(editor.remove_tool("nope"), Err(Error::UnknownTool { .. })));
    }

    #[test]
    fn test_open_and_save_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.yaml");

        let mut editor = CatalogEditor::open(&path).unwrap();
        assert!(editor.file().tools.is_empty());
        editor.upsert_tool(package("jq", None, &[])).unwrap();
        editor.save().unwrap();

        let reopened = CatalogEditor::open(&path).unwrap();
        assert!(reopened.catalog().unwrap().contains("jq"));
    }

    #[test]
    fn test_save_without_path() {
        assert!(CatalogEditor::new(CatalogFile::default()).save().is_err());
    }
}
