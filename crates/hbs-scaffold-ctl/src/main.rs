//! hbs-scaffold-ctl
//!
//! Renders DbContext and entity type sources from a JSON database model and
//! a directory of Handlebars templates (or the bundled defaults).

mod commands;
mod template_dir;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hbs_scaffold::{LanguageMode, NamingConvention, ReverseEngineerMode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hbs-scaffold-ctl", version, about = "Template-driven DbContext and entity type generator")]
pub(crate) struct Cli {
    /// Log filter directive, e.g. `hbs_scaffold=debug`
    #[arg(long, global = true, env = "HBS_SCAFFOLD_LOG", default_value = "hbs_scaffold=info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate source files for a database model
    Generate(GenerateArgs),
    /// Inspect or export the bundled templates
    #[command(subcommand)]
    Templates(TemplateCommands),
}

#[derive(Debug, clap::Args)]
pub(crate) struct GenerateArgs {
    /// Database model (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Template directory; templates missing from it fall back to the bundled ones
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Options file (defaults to ./scaffold.toml when present)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Output directory; prints to stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// db-context-only, entities-only or db-context-and-entities
    #[arg(long)]
    mode: Option<ReverseEngineerMode>,

    /// csharp or typescript
    #[arg(short, long)]
    language: Option<LanguageMode>,

    #[arg(long)]
    namespace: Option<String>,

    #[arg(long)]
    context_name: Option<String>,

    /// none, pascal or camel
    #[arg(long)]
    naming: Option<NamingConvention>,

    /// Stop at the first failing entity
    #[arg(long)]
    fail_fast: bool,

    /// Render entity types in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Debug, Subcommand)]
pub(crate) enum TemplateCommands {
    /// List bundled template paths
    List,
    /// Write the bundled templates to a directory for customization
    Export {
        /// Destination directory
        #[arg(short, long)]
        out: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log)?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => commands::handle_generate_command(args),
        Commands::Templates(cmd) => commands::handle_template_command(cmd),
    }
}
