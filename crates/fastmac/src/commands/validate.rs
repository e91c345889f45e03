//! Validate command

use anyhow::{bail, Result};
use fastmac_catalog::{load_catalog_file, Catalog};
use fastmac_core::Error;

use super::CommandContext;
use crate::cli::ValidateArgs;
use crate::output;

/// Check a catalog: schema, model invariants, then dependency cycles
pub fn run(args: ValidateArgs, ctx: &CommandContext) -> Result<()> {
    let path = args
        .file
        .as_deref()
        .unwrap_or_else(|| ctx.catalog_path());

    output::info(&format!("Validating {}", path));

    let result = load_catalog_file(path.as_std_path())
        .and_then(|file| Catalog::new(&file))
        .and_then(|catalog| catalog.check_acyclic().map(|_| catalog));

    match result {
        Ok(catalog) => {
            let empty: Vec<&str> = catalog
                .categories()
                .iter()
                .filter(|c| catalog.tools_in_category(&c.id).is_empty())
                .map(|c| c.id.as_str())
                .collect();
            if !empty.is_empty() {
                output::warning(&format!("Categories without tools: {}", empty.join(", ")));
            }
            let uncategorized = catalog.uncategorized().len();
            if uncategorized > 0 {
                output::warning(&format!("{} tool(s) are not in a known category", uncategorized));
            }
            output::success(&format!(
                "Catalog is valid ({} categories, {} tools)",
                catalog.categories().len(),
                catalog.len()
            ));
            Ok(())
        }
        Err(Error::CatalogInvalid { problems }) => {
            for problem in &problems {
                output::error(problem);
            }
            bail!("Catalog has {} problem(s)", problems.len())
        }
        Err(e) => Err(e.into()),
    }
}
