//! Estimate command

use anyhow::Result;
use fastmac_catalog::{DependencyResolver, InstallEstimate};

use super::CommandContext;
use crate::cli::EstimateArgs;
use crate::output;

/// Estimate install time, prerequisites included
pub fn run(args: EstimateArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let resolution = DependencyResolver::new(&catalog, ctx.policy(&args.policy)).resolve(&args.tools)?;
    let estimate = InstallEstimate::for_tools(resolution.order.iter().copied());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    for warning in &resolution.warnings {
        output::warning(&warning.to_string());
    }

    output::header("Install estimate");
    output::kv("Tools", &estimate.tool_count().to_string());
    output::kv("Packages", &estimate.packages.to_string());
    output::kv("Casks", &estimate.casks.to_string());
    output::kv("Custom", &estimate.custom.to_string());
    output::kv("Estimated time", &format!("{} minutes", estimate.total_minutes));

    Ok(())
}
