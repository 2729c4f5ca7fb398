//! `transync units`: which units a sync would process, and their outputs.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use transync_core::{allow_list, Dialect};
use transync_sync::resolve::resolve_units;

use super::{relative, Workspace};

/// Arguments for `transync units`.
#[derive(Args, Debug)]
pub struct UnitsArgs {
    /// Only this unit.
    pub unit: Option<String>,
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "unit")]
    unit: String,
    #[tabled(rename = "source")]
    source: String,
    #[tabled(rename = "python2")]
    python2: String,
    #[tabled(rename = "python3")]
    python3: String,
    #[tabled(rename = "php")]
    php: String,
}

impl UnitsArgs {
    pub fn run(self, ws: &Workspace) -> Result<()> {
        let layout = &ws.layout;
        let trees = layout
            .target_trees_at(&ws.root)
            .context("invalid target configuration")?;
        let allow_path = layout.allow_list_at(&ws.root);
        let allow = allow_list::load_from(&allow_path)
            .with_context(|| format!("failed to load {}", allow_path.display()))?;
        let units = resolve_units(
            &layout.source_dir_at(&ws.root),
            &layout.source.extension,
            &allow,
            self.unit.as_deref(),
        )?;

        if units.is_empty() {
            println!("{}", "No matching units.".yellow());
            return Ok(());
        }

        let output = |dialect: Dialect, unit: &transync_core::SourceUnit| {
            trees
                .iter()
                .find(|t| t.dialect == dialect)
                .map(|t| relative(&ws.root, &t.output_path(&unit.id)))
                .unwrap_or_default()
        };
        let rows: Vec<UnitRow> = units
            .iter()
            .map(|unit| UnitRow {
                unit: unit.id.to_string(),
                source: relative(&ws.root, &unit.path),
                python2: output(Dialect::Python2, unit),
                python3: output(Dialect::Python3, unit),
                php: output(Dialect::Php, unit),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!("{} of {} allow-listed units", units.len(), allow.len());
        Ok(())
    }
}
