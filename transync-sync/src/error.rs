//! Error types for transync-sync.

use std::path::PathBuf;

use thiserror::Error;

use transync_core::{ConfigError, TranslateError, UnitId};
use transync_render::RenderError;

/// All errors that can abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Layout, allow-list or target-tree configuration problem.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error from the banner renderer.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The translator rejected a canonical unit.
    #[error("failed to transpile unit '{unit}': {source}")]
    Translation {
        unit: UnitId,
        #[source]
        source: TranslateError,
    },

    /// The translator rejected a derived fixture.
    #[error("failed to transpile fixture '{fixture}': {source}")]
    FixtureTranslation {
        fixture: String,
        #[source]
        source: TranslateError,
    },

    /// Two units produced the same class name in one run.
    #[error("class '{class_name}' from unit '{unit}' is already registered in this run")]
    DuplicateClass { class_name: String, unit: UnitId },

    /// A bounded-block artifact no longer contains its block.
    #[error("no block matching /{pattern}/ in {path}")]
    BlockNotFound { path: PathBuf, pattern: String },

    /// A required rewrite rule matched nothing; the canonical fixture drifted.
    #[error("rewrite rule /{pattern}/ of fixture '{fixture}' matched nothing")]
    RuleDrift { fixture: String, pattern: String },

    /// A rewrite or block pattern failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Compile a pattern, mapping failure to [`SyncError::Pattern`].
pub(crate) fn compile(pattern: &str) -> Result<regex::Regex, SyncError> {
    regex::Regex::new(pattern).map_err(|e| SyncError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })
}
