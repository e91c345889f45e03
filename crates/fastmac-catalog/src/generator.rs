//! End-to-end script generation: resolve, estimate, emit

use fastmac_core::error::{Error, Result};
use fastmac_core::types::{FastmacConfigFile, ResolutionPolicy};
use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::emitter::{EmitOptions, ScriptEmitter};
use crate::estimate::InstallEstimate;
use crate::resolver::{DependencyResolver, ResolveWarning};

/// A rendered script and what went into it
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedScript {
    /// Full script text
    pub script: String,
    /// Tool ids in install order
    pub order: Vec<String>,
    /// Lenient-mode skips
    #[serde(skip)]
    pub warnings: Vec<ResolveWarning>,
    pub estimate: InstallEstimate,
}

/// Script generator bound to one configuration
#[derive(Debug)]
pub struct ScriptGenerator {
    emitter: ScriptEmitter,
    policy: ResolutionPolicy,
    include_estimate: bool,
}

impl ScriptGenerator {
    pub fn new(config: &FastmacConfigFile) -> Result<Self> {
        Ok(Self {
            emitter: ScriptEmitter::new(&config.script, &config.package_manager)?,
            policy: config.resolution.policy,
            include_estimate: config.script.include_estimate,
        })
    }

    /// Override the configured resolution policy
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Generate an install script for `selection`
    ///
    /// Fails without producing any text if resolution or rendering fails, or
    /// if lenient skipping leaves nothing to install.
    pub fn generate<S: AsRef<str>>(
        &self,
        catalog: &Catalog,
        selection: &[S],
        generated_on: Option<String>,
    ) -> Result<GeneratedScript> {
        let resolution = DependencyResolver::new(catalog, self.policy).resolve(selection)?;
        if resolution.order.is_empty() {
            return Err(Error::EmptySelection);
        }

        let estimate = InstallEstimate::for_tools(resolution.order.iter().copied());
        let options = EmitOptions {
            generated_on,
            estimate_minutes: self.include_estimate.then_some(estimate.total_minutes),
        };

        let script = self
            .emitter
            .emit(&resolution.order, &resolution.selected, &options)?;

        info!(
            "Generated install script for {} tool(s) ({} selected)",
            resolution.order.len(),
            resolution.selected.len()
        );

        Ok(GeneratedScript {
            script,
            order: resolution.order.iter().map(|t| t.id.clone()).collect(),
            warnings: resolution.warnings,
            estimate,
        })
    }
}
