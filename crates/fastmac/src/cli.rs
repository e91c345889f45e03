//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// FastMac - generate a setup script for the tools you pick
#[derive(Parser, Debug)]
#[command(name = "fastmac")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to fastmac.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Catalog file to use instead of the configured one
    #[arg(long, global = true)]
    pub catalog: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an install script for the selected tools
    Generate(GenerateArgs),

    /// Show the install order for the selected tools
    Resolve(ResolveArgs),

    /// List catalog tools by category
    List(ListArgs),

    /// Show details for one tool
    Info(InfoArgs),

    /// Search tools by id, name or description
    Search(SearchArgs),

    /// Validate the catalog
    Validate(ValidateArgs),

    /// Estimate install time for the selected tools
    Estimate(EstimateArgs),

    /// Edit the catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Show version information
    Version(VersionArgs),
}

/// Resolution policy flags shared by commands that resolve a selection
#[derive(Args, Debug, Clone, Copy)]
pub struct PolicyArgs {
    /// Skip unknown tools with a warning instead of failing
    #[arg(long, conflicts_with = "strict")]
    pub lenient: bool,

    /// Fail on unknown tools, whatever the configuration says
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Tool ids to install
    #[arg(required = true, num_args = 1..)]
    pub tools: Vec<String>,

    /// Write the script to a file (made executable) instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Leave the generation date out of the header
    #[arg(long)]
    pub no_date: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Tool ids to resolve
    #[arg(required = true, num_args = 1..)]
    pub tools: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list tools in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Tool id
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to validate (defaults to the configured catalog)
    pub file: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Tool ids to estimate
    #[arg(required = true, num_args = 1..)]
    pub tools: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

// Catalog commands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Add a category or rename an existing one
    AddCategory(AddCategoryArgs),

    /// Remove a category that has no tools
    RemoveCategory(RemoveArgs),

    /// Add a tool or replace an existing one
    AddTool(AddToolArgs),

    /// Remove a tool nothing depends on
    RemoveTool(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct AddCategoryArgs {
    /// Category id
    pub id: String,

    /// Display name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Id to remove
    pub id: String,
}

#[derive(Args, Debug)]
pub struct AddToolArgs {
    /// Tool id
    pub id: String,

    /// Display name (defaults to the id)
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Category id
    #[arg(long)]
    pub category: Option<String>,

    /// Package name (defaults to the id for package installs)
    #[arg(long, conflicts_with = "command")]
    pub package: Option<String>,

    /// Install with the cask verb
    #[arg(long, conflicts_with = "command")]
    pub cask: bool,

    /// Install with this shell command instead of the package manager
    #[arg(long)]
    pub command: Option<String>,

    /// Command that succeeds when the tool is already installed
    #[arg(long)]
    pub check: Option<String>,

    /// Tools that must be installed first (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub requires: Vec<String>,

    /// Command to run before installing (repeatable)
    #[arg(long = "pre")]
    pub pre_install: Vec<String>,

    /// Command to run after installing (repeatable)
    #[arg(long = "post")]
    pub post_install: Vec<String>,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
