//! `transync diff`: show unified diffs for what sync would change.

use anyhow::{Context, Result};
use clap::Args;

use transync_sync::diff_plan;

use super::Workspace;

/// Arguments for `transync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Only this unit; omit to diff every allow-listed unit.
    pub unit: Option<String>,
}

impl DiffArgs {
    pub fn run(self, ws: &Workspace) -> Result<()> {
        let diffs = diff_plan(&ws.root, &ws.layout, &ws.translator, self.unit.as_deref())
            .context("diff failed")?;

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
