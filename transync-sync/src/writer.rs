//! Full-overwrite writer shared by every generated artifact.
//!
//! ## `atomic_write`: protocol
//!
//! 1. Read the current file, if any.
//! 2. Byte-identical → skip (file and mtime untouched).
//! 3. Dry-run → report what would be written.
//! 4. Write to `<path>.transync.tmp`.
//! 5. Rename to final path (atomic on POSIX).
//!
//! `replace_block` is read-whole → substitute first match → `atomic_write`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::error::{io_err, SyncError};

/// What happened to one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WriteResult {
    Written { path: PathBuf },
    /// On-disk bytes already match.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written with `content`.
    WouldWrite {
        path: PathBuf,
        #[serde(skip)]
        content: String,
    },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path, .. } => path,
        }
    }

    /// `true` for `Written` and `WouldWrite`.
    pub fn is_change(&self) -> bool {
        !matches!(self, WriteResult::Unchanged { .. })
    }
}

/// Replace the whole content of `path` with `content`.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.transync.tmp", path.display()));
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    match std::fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(io_err(path, err)),
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
            content: content.to_string(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Substitute the first match of `pattern` in `path` with `replacement`.
///
/// The replacement is inserted literally (`$` is not expanded). A file that
/// no longer contains the block is an error, never a silent no-op.
pub fn replace_block(
    path: &Path,
    pattern: &Regex,
    replacement: &str,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let current = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let Some(found) = pattern.find(&current) else {
        return Err(SyncError::BlockNotFound {
            path: path.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        });
    };

    let mut updated = String::with_capacity(current.len() + replacement.len());
    updated.push_str(&current[..found.start()]);
    updated.push_str(replacement);
    updated.push_str(&current[found.end()..]);
    atomic_write(path, &updated, dry_run)
}
