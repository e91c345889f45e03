//! Search command

use anyhow::Result;

use super::list::tool_table;
use super::CommandContext;
use crate::cli::SearchArgs;
use crate::output;

pub fn run(args: SearchArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let matches = catalog.search(&args.query);

    if matches.is_empty() {
        output::info(&format!("No tools match '{}'", args.query));
        return Ok(());
    }

    println!("{}", tool_table(matches));
    Ok(())
}
