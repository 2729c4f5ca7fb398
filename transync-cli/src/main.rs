//! transync: keep generated Python and PHP exchange clients in step with
//! their canonical JS sources.
//!
//! # Usage
//!
//! ```text
//! transync [--root DIR] [--config FILE] sync [UNIT] [--dry-run] [--json]
//! transync [--root DIR] [--config FILE] diff [UNIT]
//! transync [--root DIR] [--config FILE] units [UNIT]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, sync::SyncArgs, units::UnitsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "transync",
    version,
    about = "Synchronize generated exchange clients with their canonical sources",
    long_about = None,
)]
struct Cli {
    /// Repository root (defaults to the current directory).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Layout file (defaults to `<root>/transync.yaml`, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transpile units, prune stale outputs and refresh derived artifacts.
    Sync(SyncArgs),

    /// Show unified diff of what sync would change.
    Diff(DiffArgs),

    /// List the units a sync would process and where their outputs go.
    Units(UnitsArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let workspace = commands::load_workspace(cli.root.as_deref(), cli.config.as_deref())?;
    match cli.command {
        Commands::Sync(args) => args.run(&workspace),
        Commands::Diff(args) => args.run(&workspace),
        Commands::Units(args) => args.run(&workspace),
    }
}
