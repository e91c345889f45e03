//! Catalog model
//!
//! A validated, read-only snapshot of categories and tools. Construction
//! checks every invariant up front so resolution never discovers a broken
//! record halfway through; lookups go through a flat id index.

use fastmac_core::error::{Error, Result};
use fastmac_core::types::{CatalogFile, Category, ResolutionPolicy, Tool};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::resolver::DependencyResolver;

/// Validated catalog snapshot
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

/// Selected tools resolved against the catalog, in input order
#[derive(Debug, Clone)]
pub struct Selection<'c> {
    /// Tools that resolved
    pub tools: Vec<&'c Tool>,
    /// Identifiers that did not resolve (lenient policy only)
    pub unresolved: Vec<String>,
}

/// A category together with its tools, for display
#[derive(Debug, Clone)]
pub struct CategoryListing<'c> {
    pub category: &'c Category,
    pub tools: Vec<&'c Tool>,
}

impl Catalog {
    /// Build a catalog from a parsed document, rejecting it if any invariant fails
    pub fn new(file: &CatalogFile) -> Result<Self> {
        let mut problems = Vec::new();

        let mut category_ids = HashSet::new();
        for category in &file.categories {
            if category.id.trim().is_empty() {
                problems.push("category with an empty id".to_string());
            } else if !category_ids.insert(category.id.as_str()) {
                problems.push(format!("duplicate category id '{}'", category.id));
            }
        }

        let known_ids: HashSet<&str> = file
            .tools
            .iter()
            .map(|t| t.id.trim())
            .filter(|id| !id.is_empty())
            .collect();

        let mut tools = Vec::with_capacity(file.tools.len());
        let mut index = HashMap::with_capacity(file.tools.len());

        for record in &file.tools {
            let tool = match Tool::from_record(record) {
                Ok(tool) => tool,
                Err(mut record_problems) => {
                    problems.append(&mut record_problems);
                    continue;
                }
            };

            if index.contains_key(&tool.id) {
                problems.push(format!("duplicate tool id '{}'", tool.id));
                continue;
            }

            for dep in &tool.requires {
                if !known_ids.contains(dep.as_str()) {
                    problems.push(format!(
                        "tool '{}' requires unknown tool '{}'",
                        tool.id, dep
                    ));
                }
            }

            if let Some(category) = &tool.category_id {
                if !category_ids.contains(category.as_str()) {
                    warn!(
                        "Tool '{}' references unknown category '{}'; listing it as uncategorized",
                        tool.id, category
                    );
                }
            }

            index.insert(tool.id.clone(), tools.len());
            tools.push(tool);
        }

        if !problems.is_empty() {
            debug!("Catalog rejected with {} problem(s)", problems.len());
            return Err(Error::catalog_invalid(problems));
        }

        info!(
            "Loaded catalog with {} categories and {} tools",
            file.categories.len(),
            tools.len()
        );

        Ok(Self {
            categories: file.categories.clone(),
            tools,
            index,
        })
    }

    /// Look up a tool by identifier
    pub fn lookup_tool(&self, id: &str) -> Option<&Tool> {
        self.index.get(id).map(|&i| &self.tools[i])
    }

    /// Check if a tool exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve external identifiers to tools, preserving input order
    ///
    /// Repeated identifiers collapse to their first occurrence. Under the
    /// strict policy the first unknown identifier fails the call; under the
    /// lenient policy unknown identifiers are collected in `unresolved`.
    pub fn all_selected<S: AsRef<str>>(
        &self,
        ids: &[S],
        policy: ResolutionPolicy,
    ) -> Result<Selection<'_>> {
        let mut seen = HashSet::new();
        let mut selection = Selection {
            tools: Vec::new(),
            unresolved: Vec::new(),
        };

        for id in ids.iter().map(|s| s.as_ref().trim()).filter(|s| !s.is_empty()) {
            if !seen.insert(id) {
                continue;
            }
            match self.lookup_tool(id) {
                Some(tool) => selection.tools.push(tool),
                None => match policy {
                    ResolutionPolicy::Strict => return Err(Error::unknown_tool(id)),
                    ResolutionPolicy::Lenient => selection.unresolved.push(id.to_string()),
                },
            }
        }

        Ok(selection)
    }

    /// All tools in catalog order
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    /// All categories in catalog order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get a category by identifier
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools filed under a category, in catalog order
    pub fn tools_in_category(&self, category_id: &str) -> Vec<&Tool> {
        self.tools
            .iter()
            .filter(|t| t.category_id.as_deref() == Some(category_id))
            .collect()
    }

    /// Categories with their tools; categories without tools are left out
    pub fn categories_with_tools(&self) -> Vec<CategoryListing<'_>> {
        self.categories
            .iter()
            .map(|category| CategoryListing {
                category,
                tools: self.tools_in_category(&category.id),
            })
            .filter(|listing| !listing.tools.is_empty())
            .collect()
    }

    /// Tools with no category or a category the catalog does not define
    pub fn uncategorized(&self) -> Vec<&Tool> {
        self.tools
            .iter()
            .filter(|t| match &t.category_id {
                Some(id) => self.category(id).is_none(),
                None => true,
            })
            .collect()
    }

    /// Case-insensitive search over id, name and description
    pub fn search(&self, query: &str) -> Vec<&Tool> {
        let query = query.trim().to_lowercase();
        self.tools
            .iter()
            .filter(|t| {
                t.id.to_lowercase().contains(&query)
                    || t.name.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Tools that list `id` directly in their requires
    pub fn dependents_of(&self, id: &str) -> Vec<&Tool> {
        self.tools
            .iter()
            .filter(|t| t.requires.iter().any(|r| r == id))
            .collect()
    }

    /// Every prerequisite of `id`, transitively, in install order (excluding `id` itself)
    pub fn transitive_requirements(&self, id: &str) -> Result<Vec<&Tool>> {
        let resolution = DependencyResolver::new(self, ResolutionPolicy::Strict).resolve(&[id])?;
        Ok(resolution
            .order
            .into_iter()
            .filter(|t| t.id != id)
            .collect())
    }

    /// Fail with `CycleDetected` if any tool's requirements loop back on themselves
    pub fn check_acyclic(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Ok(());
        }
        let ids: Vec<&str> = self.tools.iter().map(|t| t.id.as_str()).collect();
        DependencyResolver::new(self, ResolutionPolicy::Strict).resolve(&ids)?;
        Ok(())
    }
}
