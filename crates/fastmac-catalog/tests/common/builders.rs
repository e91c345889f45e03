//! Fluent builders for catalog fixtures

#![allow(dead_code)]

use fastmac_catalog::Catalog;
use fastmac_core::types::{CatalogFile, Category, ToolKind, ToolRecord};

/// Builder for tool records
pub struct ToolBuilder {
    record: ToolRecord,
}

impl ToolBuilder {
    /// A standard tool installed from a package of the same name
    pub fn package(id: &str) -> Self {
        Self {
            record: ToolRecord {
                id: id.to_string(),
                name: id.to_string(),
                brew_package: Some(id.to_string()),
                ..Default::default()
            },
        }
    }

    /// A standard tool installed with the cask verb
    pub fn cask(id: &str) -> Self {
        let mut builder = Self::package(id);
        builder.record.cask = true;
        builder
    }

    /// A custom tool installed by `command`
    pub fn custom(id: &str, command: &str) -> Self {
        Self {
            record: ToolRecord {
                id: id.to_string(),
                name: id.to_string(),
                kind: ToolKind::Custom,
                install_command: Some(command.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = description.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category_id = Some(category.to_string());
        self
    }

    pub fn brew_package(mut self, package: &str) -> Self {
        self.record.brew_package = Some(package.to_string());
        self
    }

    pub fn check(mut self, command: &str) -> Self {
        self.record.check_command = Some(command.to_string());
        self
    }

    pub fn requires(mut self, ids: &[&str]) -> Self {
        self.record.requires = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn pre_install(mut self, commands: &[&str]) -> Self {
        self.record.pre_install = commands.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn post_install(mut self, commands: &[&str]) -> Self {
        self.record.post_install = commands.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> ToolRecord {
        self.record
    }
}

/// Builder for catalog documents
#[derive(Default)]
pub struct CatalogBuilder {
    file: CatalogFile,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: &str, name: &str) -> Self {
        self.file.categories.push(Category {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn tool(mut self, tool: ToolBuilder) -> Self {
        self.file.tools.push(tool.build());
        self
    }

    pub fn file(self) -> CatalogFile {
        self.file
    }

    /// Build and validate, panicking on an invalid fixture
    pub fn build(self) -> Catalog {
        Catalog::new(&self.file).expect("fixture catalog should be valid")
    }
}
