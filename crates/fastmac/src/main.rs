//! FastMac CLI - dependency-aware macOS setup script generator
//!
//! This is the main entry point for the fastmac command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Commands::Version(args) = &cli.command {
        return commands::version::run(args);
    }

    let ctx = CommandContext::load(cli.config.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, &ctx),
        Commands::Resolve(args) => commands::resolve::run(args, &ctx),
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Info(args) => commands::info::run(args, &ctx),
        Commands::Search(args) => commands::search::run(args, &ctx),
        Commands::Validate(args) => commands::validate::run(args, &ctx),
        Commands::Estimate(args) => commands::estimate::run(args, &ctx),
        Commands::Catalog(cmd) => commands::catalog::run(cmd, &ctx),
        Commands::Version(_) => Ok(()),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so a generated script on stdout stays clean.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
