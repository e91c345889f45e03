//! Generate command

use anyhow::{Context, Result};
use camino::Utf8Path;
use fastmac_catalog::ScriptGenerator;

use super::CommandContext;
use crate::cli::GenerateArgs;
use crate::output;

/// Generate an install script and print it or write it to a file
pub fn run(args: GenerateArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ctx.catalog()?;
    let generator = ScriptGenerator::new(&ctx.config.config)?.with_policy(ctx.policy(&args.policy));

    let generated_on = (!args.no_date).then(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    let generated = generator.generate(&catalog, &args.tools, generated_on)?;

    for warning in &generated.warnings {
        output::warning(&warning.to_string());
    }

    match &args.output {
        Some(path) => {
            write_script(path, &generated.script)?;
            output::success(&format!(
                "Wrote {} ({} tools, about {} minutes)",
                path,
                generated.order.len(),
                generated.estimate.total_minutes
            ));
        }
        None => print!("{}", generated.script),
    }

    Ok(())
}

fn write_script(path: &Utf8Path, script: &str) -> Result<()> {
    std::fs::write(path, script).with_context(|| format!("Failed to write {}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .with_context(|| format!("Failed to read permissions of {}", path))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("Failed to make {} executable", path))?;
    }

    Ok(())
}
