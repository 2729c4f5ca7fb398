//! `transync sync`: transpile units and refresh every derived artifact.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use transync_sync::{run, PruneResult, SyncOptions, SyncOutcome, SyncReport, WriteResult};

use super::{relative, Workspace};

/// Arguments for `transync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only this unit (`kraken` or `kraken.js`); omit to sync every allow-listed unit.
    pub unit: Option<String>,

    /// Show what would be written or deleted without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self, ws: &Workspace) -> Result<()> {
        let options = SyncOptions {
            filter: self.unit.clone(),
            dry_run: self.dry_run,
        };
        let outcome = run(&ws.root, &ws.layout, &ws.translator, &options).with_context(|| {
            match &self.unit {
                Some(unit) => format!("sync failed for '{unit}'"),
                None => "sync failed".to_string(),
            }
        })?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return Ok(());
        }

        match outcome {
            SyncOutcome::NoMatch => println!("{}", "0 files transpiled.".yellow()),
            SyncOutcome::Synced(report) => print_report(ws, &report),
        }
        Ok(())
    }
}

fn print_report(ws: &Workspace, report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let changed = report.changed().count();

    println!(
        "{prefix}{} {} units transpiled ({} written, {} unchanged, {} pruned)",
        "✓".green(),
        report.units.len(),
        changed,
        report.unchanged_count(),
        report.pruned.len()
    );

    for write in &report.writes {
        let path = relative(&ws.root, write.path());
        match write {
            WriteResult::Written { .. } => println!("  {}  {path}", "✎".green()),
            WriteResult::WouldWrite { .. } => println!("  {}  {path}", "~".yellow()),
            WriteResult::Unchanged { .. } => {}
        }
    }
    for prune in &report.pruned {
        let path = relative(&ws.root, prune.path());
        match prune {
            PruneResult::Deleted { .. } => println!("  {}  {path}", "✗".red()),
            PruneResult::WouldDelete { .. } => println!("  {}  {path}", "-".yellow()),
        }
    }
}
