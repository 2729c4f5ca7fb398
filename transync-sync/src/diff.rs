//! Dry-run unified diff support for `transync diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use transync_core::{Layout, Translator};

use crate::error::{io_err, SyncError};
use crate::pipeline::{run, SyncOptions, SyncOutcome};
use crate::prune::PruneResult;
use crate::writer::WriteResult;

/// A single planned change, rendered as a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Plan a sync without writing and compare it with on-disk content.
///
/// Planned deletions diff against an empty file. Returns an empty list when
/// nothing would change or no unit matched.
pub fn diff_plan(
    root: &Path,
    layout: &Layout,
    translator: &dyn Translator,
    filter: Option<&str>,
) -> Result<Vec<FileDiff>, SyncError> {
    let options = SyncOptions {
        filter: filter.map(str::to_string),
        dry_run: true,
    };
    let report = match run(root, layout, translator, &options)? {
        SyncOutcome::NoMatch => return Ok(vec![]),
        SyncOutcome::Synced(report) => report,
    };

    let mut diffs = Vec::new();
    for write in &report.writes {
        if let WriteResult::WouldWrite { path, content } = write {
            let existing = read_existing_or_empty(path)?;
            diffs.push(render(root, path, &existing, content));
        }
    }
    for prune in &report.pruned {
        if let PruneResult::WouldDelete { path } = prune {
            let existing = read_existing_or_empty(path)?;
            diffs.push(render(root, path, &existing, ""));
        }
    }
    Ok(diffs)
}

fn render(root: &Path, path: &Path, old: &str, new: &str) -> FileDiff {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified_diff = TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();
    FileDiff {
        path: path.to_path_buf(),
        unified_diff,
    }
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
