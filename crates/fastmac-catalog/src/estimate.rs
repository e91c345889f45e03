//! Rough install-time estimate for a resolved tool list

use fastmac_core::types::{InstallMethod, Tool};
use serde::Serialize;

/// Minutes charged per custom install command
const CUSTOM_MINUTES: f64 = 3.0;
/// Minutes charged per cask install
const CASK_MINUTES: f64 = 1.5;
/// Minutes charged per regular package install
const PACKAGE_MINUTES: f64 = 0.5;
/// Package-manager bootstrap and refresh
const SETUP_MINUTES: f64 = 2.0;
const MINIMUM_MINUTES: u32 = 5;

/// Install-time estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallEstimate {
    pub total_minutes: u32,
    pub packages: usize,
    pub casks: usize,
    pub custom: usize,
}

impl InstallEstimate {
    /// Estimate over tools in install order, prerequisites included
    pub fn for_tools<'a, I>(tools: I) -> Self
    where
        I: IntoIterator<Item = &'a Tool>,
    {
        let mut estimate = Self {
            total_minutes: 0,
            packages: 0,
            casks: 0,
            custom: 0,
        };

        for tool in tools {
            match &tool.install {
                InstallMethod::Custom { .. } => estimate.custom += 1,
                InstallMethod::Package { cask: true, .. } => estimate.casks += 1,
                InstallMethod::Package { cask: false, .. } => estimate.packages += 1,
            }
        }

        let minutes = estimate.custom as f64 * CUSTOM_MINUTES
            + estimate.casks as f64 * CASK_MINUTES
            + estimate.packages as f64 * PACKAGE_MINUTES
            + SETUP_MINUTES;

        estimate.total_minutes = (minutes.ceil() as u32).max(MINIMUM_MINUTES);
        estimate
    }

    pub fn tool_count(&self) -> usize {
        self.packages + self.casks + self.custom
    }
}
