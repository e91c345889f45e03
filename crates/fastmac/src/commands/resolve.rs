//! Resolve command

use anyhow::Result;
use fastmac_catalog::DependencyResolver;
use serde_json::json;

use super::CommandContext;
use crate::cli::ResolveArgs;
use crate::output;

/// Print the install order for a selection
pub fn run(args: ResolveArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let resolution = DependencyResolver::new(&catalog, ctx.policy(&args.policy)).resolve(&args.tools)?;

    if args.json {
        let warnings: Vec<String> = resolution.warnings.iter().map(|w| w.to_string()).collect();
        let value = json!({
            "selected": resolution.selected,
            "order": resolution.ids(),
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for warning in &resolution.warnings {
        output::warning(&warning.to_string());
    }

    for (i, tool) in resolution.order.iter().enumerate() {
        let marker = if resolution.selected.iter().any(|s| s == &tool.id) {
            ""
        } else {
            " (dependency)"
        };
        println!("{:>3}. {} [{}]{}", i + 1, tool.id, tool.kind(), marker);
    }

    Ok(())
}
