//! Error types for transync-render.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax, missing template or context serialization.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Reading an override template failed.
    #[error("cannot read template at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
