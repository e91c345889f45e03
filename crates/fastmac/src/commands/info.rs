//! Info command

use anyhow::{anyhow, Result};
use fastmac_catalog::ScriptEmitter;
use serde_json::json;

use super::CommandContext;
use crate::cli::InfoArgs;
use crate::output;

/// Show one tool: install method, prerequisites and dependents
pub fn run(args: InfoArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let tool = catalog
        .lookup_tool(&args.id)
        .ok_or_else(|| anyhow!("Tool '{}' not found in {}", args.id, ctx.catalog_path()))?;

    let config = &ctx.config.config;
    let install = ScriptEmitter::new(&config.script, &config.package_manager)?.install_line(tool)?;
    let prerequisites: Vec<&str> = catalog
        .transitive_requirements(&tool.id)?
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    let dependents: Vec<&str> = catalog
        .dependents_of(&tool.id)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    let category = tool
        .category_id
        .as_deref()
        .map(|id| catalog.category(id).map(|c| c.name.as_str()).unwrap_or(id));

    if args.json {
        let value = json!({
            "tool": tool,
            "install_line": install,
            "prerequisites": prerequisites,
            "required_by": dependents,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::header(&tool.name);
    output::kv("Id", &tool.id);
    if !tool.description.is_empty() {
        output::kv("Description", &tool.description);
    }
    output::kv("Category", category.unwrap_or("-"));
    output::kv("Type", &tool.kind().to_string());
    output::kv("Check", &tool.check_command);
    output::kv("Install", &install);
    for (i, step) in tool.pre_install.iter().enumerate() {
        output::kv(&format!("Pre-install {}", i + 1), step);
    }
    for (i, step) in tool.post_install.iter().enumerate() {
        output::kv(&format!("Post-install {}", i + 1), step);
    }
    output::kv("Requires", &join_or_dash(&tool.requires));
    output::kv("Installs first", &join_or_dash(&prerequisites));
    output::kv("Required by", &join_or_dash(&dependents));

    Ok(())
}

fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
    }
}
