//! Catalog editing commands

use anyhow::{Context, Result};
use fastmac_catalog::CatalogEditor;
use fastmac_core::types::{Category, ToolKind, ToolRecord};

use super::CommandContext;
use crate::cli::{AddCategoryArgs, AddToolArgs, CatalogCommands, RemoveArgs};
use crate::output;

pub fn run(cmd: CatalogCommands, ctx: &CommandContext) -> Result<()> {
    let path = ctx.catalog_path();
    let mut editor = CatalogEditor::open(path.as_std_path())
        .with_context(|| format!("Failed to open {}", path))?;

    let message = match cmd {
        CatalogCommands::AddCategory(args) => add_category(&mut editor, args)?,
        CatalogCommands::RemoveCategory(args) => {
            let removed = editor.remove_category(&args.id)?;
            format!("Removed category '{}'", removed.id)
        }
        CatalogCommands::AddTool(args) => add_tool(&mut editor, args)?,
        CatalogCommands::RemoveTool(RemoveArgs { id }) => {
            editor.remove_tool(&id)?;
            format!("Removed tool '{}'", id)
        }
    };

    editor.save()?;
    output::success(&message);
    Ok(())
}

fn add_category(editor: &mut CatalogEditor, args: AddCategoryArgs) -> Result<String> {
    editor.upsert_category(Category {
        id: args.id.clone(),
        name: args.name,
    })?;
    Ok(format!("Saved category '{}'", args.id))
}

fn add_tool(editor: &mut CatalogEditor, args: AddToolArgs) -> Result<String> {
    let record = tool_record(args);
    let id = record.id.clone();
    editor.upsert_tool(record)?;
    Ok(format!("Saved tool '{}'", id))
}

fn tool_record(args: AddToolArgs) -> ToolRecord {
    let (kind, brew_package) = match &args.command {
        Some(_) => (ToolKind::Custom, None),
        None => (
            ToolKind::Standard,
            Some(args.package.clone().unwrap_or_else(|| args.id.clone())),
        ),
    };

    ToolRecord {
        name: args.name.unwrap_or_else(|| args.id.clone()),
        id: args.id,
        description: args.description,
        category_id: args.category,
        kind,
        brew_package,
        cask: args.cask,
        check_command: args.check,
        install_command: args.command,
        requires: args.requires,
        pre_install: args.pre_install,
        post_install: args.post_install,
    }
}
