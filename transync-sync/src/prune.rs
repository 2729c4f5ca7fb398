//! Stale Output Pruner.
//!
//! Runs once per target tree after the whole batch has been published. A file
//! is stale when its id is not a key of the run's [`ClassRegistry`], it is not
//! a directory, it matches the tree's prune pattern, and it is not protected.

use std::path::PathBuf;

use serde::Serialize;

use transync_core::{ClassRegistry, TargetTree};

use crate::error::{io_err, SyncError};

/// Outcome of pruning one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PruneResult {
    Deleted { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been deleted.
    WouldDelete { path: PathBuf },
}

impl PruneResult {
    pub fn path(&self) -> &std::path::Path {
        match self {
            PruneResult::Deleted { path } | PruneResult::WouldDelete { path } => path,
        }
    }
}

/// Hand-maintained files that live next to generated ones.
///
/// Shared by every tree: `Exchange*` entry points, `errors*` taxonomy files,
/// `__init__` package files and dotfiles.
pub fn is_protected(file_name: &str) -> bool {
    file_name.starts_with("Exchange")
        || file_name.contains("errors")
        || file_name.contains("__init__")
        || file_name.starts_with('.')
}

/// File name minus a trailing `.[a-z]+` extension.
pub fn derived_id(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_lowercase()) => stem,
        _ => file_name,
    }
}

/// Delete every stale file directly under `tree.root`.
///
/// A missing root has nothing to prune. Any deletion failure aborts.
pub fn prune_tree(
    tree: &TargetTree,
    registry: &ClassRegistry,
    dry_run: bool,
) -> Result<Vec<PruneResult>, SyncError> {
    if !tree.root.exists() {
        return Ok(vec![]);
    }

    let mut entries: Vec<_> = std::fs::read_dir(&tree.root)
        .map_err(|e| io_err(&tree.root, e))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut results = Vec::new();
    for entry in entries {
        let path = entry.path();
        let meta = std::fs::symlink_metadata(&path).map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !tree.prune_pattern.is_match(&file_name)
            || registry.contains(derived_id(&file_name))
            || is_protected(&file_name)
        {
            continue;
        }

        if dry_run {
            tracing::info!("[dry-run] would delete: {}", path.display());
            results.push(PruneResult::WouldDelete { path });
        } else {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            tracing::warn!("deleted: {}", path.display());
            results.push(PruneResult::Deleted { path });
        }
    }
    Ok(results)
}
