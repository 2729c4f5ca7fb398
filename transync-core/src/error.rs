//! Error types for transync-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Dialect;

/// All errors that can arise while loading the layout or the allow-list.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the offending path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse layout at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The allow-list document is not `{ "ids": [...] }`.
    #[error("failed to parse allow-list at {path}: {source}")]
    AllowList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The same unit id appears twice in the allow-list.
    #[error("duplicate id '{0}' in allow-list")]
    DuplicateId(String),

    /// No target tree is configured for a dialect.
    #[error("no target tree configured for dialect {0}")]
    MissingDialect(Dialect),

    /// More than one target tree is configured for a dialect.
    #[error("dialect {0} is configured for more than one target tree")]
    DuplicateDialect(Dialect),

    /// A configured pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failures reported by a [`Translator`](crate::translator::Translator).
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The translator program could not be started.
    #[error("failed to spawn translator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Piping data to or from the translator failed.
    #[error("translator I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The translator rejected the input (malformed or unsupported construct).
    #[error("translator exited with {}: {stderr}", exit_label(.status))]
    Failed { status: Option<i32>, stderr: String },

    /// The translator answered with something that is not the expected JSON.
    #[error("unexpected translator response: {0}")]
    Protocol(#[from] serde_json::Error),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
