//! List command

use anyhow::{bail, Result};
use fastmac_core::types::Tool;
use serde_json::json;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use super::CommandContext;
use crate::cli::ListArgs;
use crate::output;

/// Row for one catalog tool
#[derive(Tabled)]
pub(super) struct ToolRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    kind: String,
    requires: String,
    description: String,
}

impl From<&Tool> for ToolRow {
    fn from(tool: &Tool) -> Self {
        let kind = if tool.install.is_cask() {
            "cask".to_string()
        } else {
            tool.kind().to_string()
        };
        Self {
            id: tool.id.clone(),
            name: tool.name.clone(),
            kind,
            requires: if tool.requires.is_empty() {
                "-".to_string()
            } else {
                tool.requires.join(", ")
            },
            description: tool.description.clone(),
        }
    }
}

/// Render tools as a table
pub(super) fn tool_table<'a>(tools: impl IntoIterator<Item = &'a Tool>) -> Table {
    let mut table = Table::new(tools.into_iter().map(ToolRow::from));
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::new(4..5)).with(Width::wrap(50).keep_words(true)));
    table
}

/// List tools grouped by category
pub fn run(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;

    if let Some(category_id) = &args.category {
        let Some(category) = catalog.category(category_id) else {
            bail!("Unknown category: {}", category_id);
        };
        let tools = catalog.tools_in_category(category_id);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tools)?);
        } else if tools.is_empty() {
            output::info(&format!("No tools in {}", category.name));
        } else {
            output::header(&category.name);
            println!("{}", tool_table(tools));
        }
        return Ok(());
    }

    let listings = catalog.categories_with_tools();
    let uncategorized = catalog.uncategorized();

    if args.json {
        let mut groups: Vec<_> = listings
            .iter()
            .map(|l| json!({ "category": l.category, "tools": l.tools }))
            .collect();
        if !uncategorized.is_empty() {
            groups.push(json!({ "category": null, "tools": uncategorized }));
        }
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if catalog.is_empty() {
        output::info(&format!("No tools in {}", ctx.catalog_path()));
        return Ok(());
    }

    for listing in &listings {
        output::header(&listing.category.name);
        println!("{}", tool_table(listing.tools.iter().copied()));
    }
    if !uncategorized.is_empty() {
        output::header("Uncategorized");
        println!("{}", tool_table(uncategorized));
    }

    Ok(())
}
