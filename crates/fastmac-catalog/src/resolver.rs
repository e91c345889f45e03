//! Dependency resolution
//!
//! Expands a selection into its full prerequisite closure using depth-first
//! topological ordering. Traversal state lives in [`ResolveState`] and is
//! threaded through each visit, so one resolver can serve any number of
//! independent calls against the same catalog.

use fastmac_core::error::{Error, Result};
use fastmac_core::types::{ResolutionPolicy, Tool};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

use crate::catalog::Catalog;

/// A reference the resolver skipped under the lenient policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveWarning {
    /// Identifier that did not resolve
    pub id: String,
    /// Tool whose `requires` named it, or `None` when it was selected directly
    pub required_by: Option<String>,
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.required_by {
            Some(parent) => write!(f, "skipped unknown tool '{}' required by '{}'", self.id, parent),
            None => write!(f, "skipped unknown tool '{}'", self.id),
        }
    }
}

/// Outcome of a resolution call
#[derive(Debug, Clone)]
pub struct Resolution<'c> {
    /// Tools in install order, each exactly once
    pub order: Vec<&'c Tool>,
    /// The selection as supplied, trimmed and without repeats
    pub selected: Vec<String>,
    /// References skipped under the lenient policy
    pub warnings: Vec<ResolveWarning>,
}

impl Resolution<'_> {
    /// Identifiers in install order
    pub fn ids(&self) -> Vec<&str> {
        self.order.iter().map(|t| t.id.as_str()).collect()
    }

    /// Position of a tool in the install order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|t| t.id == id)
    }
}

/// A tool being expanded and the index of its next prerequisite
struct Frame<'c> {
    tool: &'c Tool,
    next: usize,
}

/// Per-call traversal state
#[derive(Default)]
struct ResolveState<'c> {
    settled: HashSet<String>,
    in_progress: HashSet<String>,
    /// Active expansion chain, innermost last; also used to report cycles
    stack: Vec<Frame<'c>>,
    order: Vec<&'c Tool>,
    warnings: Vec<ResolveWarning>,
}

/// Dependency resolver over a catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'c> {
    catalog: &'c Catalog,
    policy: ResolutionPolicy,
}

impl<'c> DependencyResolver<'c> {
    pub fn new(catalog: &'c Catalog, policy: ResolutionPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolve a selection into install order
    ///
    /// Blank identifiers are ignored; a selection with nothing else in it is
    /// an [`Error::EmptySelection`].
    pub fn resolve<S: AsRef<str>>(&self, selection: &[S]) -> Result<Resolution<'c>> {
        let mut selected: Vec<String> = Vec::new();
        for id in selection.iter().map(|s| s.as_ref().trim()) {
            if !id.is_empty() && !selected.iter().any(|s| s == id) {
                selected.push(id.to_string());
            }
        }

        if selected.is_empty() {
            return Err(Error::EmptySelection);
        }

        debug!(
            "Resolving {} selected tool(s) with {} policy",
            selected.len(),
            self.policy
        );

        let mut state = ResolveState::default();
        for id in &selected {
            self.visit(id, &mut state)?;
        }

        debug!("Resolved install order: {:?}", state.order.iter().map(|t| &t.id).collect::<Vec<_>>());

        Ok(Resolution {
            order: state.order,
            selected,
            warnings: state.warnings,
        })
    }

    /// Settle `root` and everything it requires
    ///
    /// Uses an explicit frame stack, so chain depth is bounded by memory
    /// rather than the thread's call stack.
    fn visit(&self, root: &str, state: &mut ResolveState<'c>) -> Result<()> {
        self.enter(root, None, state)?;

        while let Some(frame) = state.stack.last_mut() {
            let tool = frame.tool;
            match tool.requires.get(frame.next) {
                Some(dep) => {
                    frame.next += 1;
                    self.enter(dep, Some(&tool.id), state)?;
                }
                None => {
                    state.stack.pop();
                    state.in_progress.remove(&tool.id);
                    state.settled.insert(tool.id.clone());
                    state.order.push(tool);
                }
            }
        }

        Ok(())
    }

    /// Push a frame for `id` unless it is already settled or unknown
    fn enter(&self, id: &str, required_by: Option<&str>, state: &mut ResolveState<'c>) -> Result<()> {
        if state.settled.contains(id) {
            return Ok(());
        }

        if state.in_progress.contains(id) {
            let start = state
                .stack
                .iter()
                .position(|f| f.tool.id == id)
                .unwrap_or(0);
            let mut cycle: Vec<String> = state.stack[start..]
                .iter()
                .map(|f| f.tool.id.clone())
                .collect();
            cycle.push(id.to_string());
            return Err(Error::cycle_detected(cycle));
        }

        match self.catalog.lookup_tool(id) {
            Some(tool) => {
                state.in_progress.insert(id.to_string());
                state.stack.push(Frame { tool, next: 0 });
                Ok(())
            }
            None => self.unresolved(id, required_by, state),
        }
    }

    fn unresolved(&self, id: &str, required_by: Option<&str>, state: &mut ResolveState<'c>) -> Result<()> {
        match self.policy {
            ResolutionPolicy::Strict => Err(Error::unknown_tool(id)),
            ResolutionPolicy::Lenient => {
                let warning = ResolveWarning {
                    id: id.to_string(),
                    required_by: required_by.map(str::to_string),
                };
                warn!("{}", warning);
                // Settle the id so further references to it are not reported again
                state.settled.insert(id.to_string());
                state.warnings.push(warning);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastmac_core::types::{CatalogFile, ToolKind, ToolRecord};

    fn record(id: &str, requires: &[&str]) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            brew_package: Some(id.to_string()),
            requires: requires.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn catalog(tools: Vec<ToolRecord>) -> Catalog {
        Catalog::new(&CatalogFile {
            tools,
            ..Default::default()
        })
        .unwrap()
    }

    fn dev_catalog() -> Catalog {
        catalog(vec![
            record("git", &[]),
            record("gh", &["git"]),
            ToolRecord {
                id: "dotfiles".to_string(),
                kind: ToolKind::Custom,
                install_command: Some("gh repo clone me/dotfiles ~/.dotfiles".to_string()),
                requires: vec!["gh".to_string()],
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_transitive_order() {
        let catalog = dev_catalog();
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let resolution = resolver.resolve(&["dotfiles"]).unwrap();
        assert_eq!(resolution.ids(), vec!["git", "gh", "dotfiles"]);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_prerequisite_selected_again_appears_once() {
        let catalog = dev_catalog();
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let resolution = resolver.resolve(&["dotfiles", "git"]).unwrap();
        assert_eq!(resolution.ids(), vec!["git", "gh", "dotfiles"]);
        assert_eq!(resolution.selected, vec!["dotfiles", "git"]);
    }

    #[test]
    fn test_unknown_tool_strict() {
        let catalog = dev_catalog();
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let err = resolver.resolve(&["unknown-tool"]).unwrap_err();
        assert!(matches!(err, Error::UnknownTool { ref id } if id == "unknown-tool"));
    }

    #[test]
    fn test_unknown_tool_lenient_keeps_the_rest() {
        let catalog = dev_catalog();
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Lenient);
        let resolution = resolver.resolve(&["unknown-tool", "gh", "unknown-tool"]).unwrap();
        assert_eq!(resolution.ids(), vec!["git", "gh"]);
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning {
                id: "unknown-tool".to_string(),
                required_by: None
            }]
        );
    }

    #[test]
    fn test_two_tool_cycle() {
        let catalog = catalog(vec![record("a", &["b"]), record("b", &["a"])]);
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let err = resolver.resolve(&["a"]).unwrap_err();
        match err {
            Error::CycleDetected { cycle } => assert_eq!(cycle, vec!["a", "b", "a"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_below_entry_point() {
        let catalog = catalog(vec![
            record("app", &["x"]),
            record("x", &["y"]),
            record("y", &["z"]),
            record("z", &["x"]),
        ]);
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Lenient);
        let err = resolver.resolve(&["app"]).unwrap_err();
        match err {
            Error::CycleDetected { cycle } => assert_eq!(cycle, vec!["x", "y", "z", "x"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_selection() {
        let catalog = dev_catalog();
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let empty: [&str; 0] = [];
        assert!(matches!(resolver.resolve(&empty), Err(Error::EmptySelection)));
        assert!(matches!(resolver.resolve(&["  ", ""]), Err(Error::EmptySelection)));
    }

    #[test]
    fn test_independent_subtrees_keep_input_order() {
        let catalog = catalog(vec![
            record("node", &[]),
            record("yarn", &["node"]),
            record("python", &[]),
            record("poetry", &["python"]),
        ]);
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let resolution = resolver.resolve(&["poetry", "yarn"]).unwrap();
        assert_eq!(resolution.ids(), vec!["python", "poetry", "node", "yarn"]);
    }

    #[test]
    fn test_diamond_shares_prerequisite() {
        let catalog = catalog(vec![
            record("base", &[]),
            record("left", &["base"]),
            record("right", &["base"]),
            record("top", &["left", "right"]),
        ]);
        let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
        let resolution = resolver.resolve(&["top"]).unwrap();
        assert_eq!(resolution.ids(), vec!["base", "left", "right", "top"]);
    }

    #[test]
    fn test_deep_chain_on_small_stack() {
        const DEPTH: usize = 20_000;

        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let tools = (0..DEPTH)
                    .map(|i| {
                        let id = format!("t{i}");
                        match i {
                            0 => record(&id, &[]),
                            _ => record(&id, &[format!("t{}", i - 1).as_str()]),
                        }
                    })
                    .collect();
                let catalog = catalog(tools);
                let resolver = DependencyResolver::new(&catalog, ResolutionPolicy::Strict);
                let resolution = resolver.resolve(&[format!("t{}", DEPTH - 1)]).unwrap();
                (
                    resolution.order.len(),
                    resolution.ids().first().map(|s| s.to_string()),
                )
            })
            .unwrap();

        let (len, first) = handle.join().unwrap();
        assert_eq!(len, DEPTH);
        assert_eq!(first.as_deref(), Some("t0"));
    }
}
