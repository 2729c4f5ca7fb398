//! Repository layout configuration.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   transync.yaml     (optional: every field defaults to the canonical layout)
//!   exchanges.json    (allow-list)
//!   js/               (canonical units)
//!   python/ccxt/      (python2 tree)
//!   python/ccxt/async_support/
//!   php/
//! ```
//!
//! All paths in the YAML document are relative to the repository root; the
//! `*_at(root)` accessors resolve them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::{Dialect, TargetTree};

/// File name of the optional layout document at the repository root.
pub const LAYOUT_FILE: &str = "transync.yaml";

// ---------------------------------------------------------------------------
// 1. Document shape
// ---------------------------------------------------------------------------

/// Root of the `transync.yaml` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub source: SourceConfig,
    pub allow_list: PathBuf,
    pub targets: Vec<TargetConfig>,
    /// Shared type-declaration artifact.
    pub declarations: PathBuf,
    pub async_sample: AsyncSampleConfig,
    pub translator: TranslatorConfig,
    /// Directory of `.tera` overrides for preambles and fixture headers.
    pub templates: PathBuf,
}

/// Where canonical units live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub dir: PathBuf,
    /// Extension (without the dot) of canonical unit files.
    pub extension: String,
}

/// One generated tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub dialect: Dialect,
    pub root: PathBuf,
    pub extension: String,
    pub prune_pattern: String,
}

/// Async sample script and its derived synchronous variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncSampleConfig {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Helper functions removed (with their call sites) from the sync variant.
    pub dropped_helpers: Vec<String>,
}

/// External translator program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            allow_list: PathBuf::from("exchanges.json"),
            targets: vec![
                TargetConfig {
                    dialect: Dialect::Python2,
                    root: PathBuf::from("python/ccxt"),
                    extension: "py".to_string(),
                    prune_pattern: r"\.pyc?$".to_string(),
                },
                TargetConfig {
                    dialect: Dialect::Python3,
                    root: PathBuf::from("python/ccxt/async_support"),
                    extension: "py".to_string(),
                    prune_pattern: r"\.pyc?$".to_string(),
                },
                TargetConfig {
                    dialect: Dialect::Php,
                    root: PathBuf::from("php"),
                    extension: "php".to_string(),
                    prune_pattern: r"\.php$".to_string(),
                },
            ],
            declarations: PathBuf::from("ccxt.d.ts"),
            async_sample: AsyncSampleConfig::default(),
            translator: TranslatorConfig::default(),
            templates: PathBuf::from(".transync/templates"),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("js"),
            extension: "js".to_string(),
        }
    }
}

impl Default for AsyncSampleConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("python/test/test_async.py"),
            target: PathBuf::from("python/test/test.py"),
            dropped_helpers: vec![
                "test_tickers_async".to_string(),
                "test_l2_order_books_async".to_string(),
            ],
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            args: vec!["build/translate-cli.js".to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

impl Layout {
    pub fn source_dir_at(&self, root: &Path) -> PathBuf {
        root.join(&self.source.dir)
    }

    pub fn allow_list_at(&self, root: &Path) -> PathBuf {
        root.join(&self.allow_list)
    }

    pub fn declarations_at(&self, root: &Path) -> PathBuf {
        root.join(&self.declarations)
    }

    pub fn templates_at(&self, root: &Path) -> PathBuf {
        root.join(&self.templates)
    }

    /// Resolve and validate the configured target trees.
    ///
    /// Every dialect must be configured exactly once. Trees are returned in
    /// configuration order.
    pub fn target_trees_at(&self, root: &Path) -> Result<Vec<TargetTree>, ConfigError> {
        let mut seen = HashSet::new();
        let mut trees = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            if !seen.insert(target.dialect) {
                return Err(ConfigError::DuplicateDialect(target.dialect));
            }
            let prune_pattern =
                Regex::new(&target.prune_pattern).map_err(|e| ConfigError::Pattern {
                    pattern: target.prune_pattern.clone(),
                    source: e,
                })?;
            trees.push(TargetTree {
                dialect: target.dialect,
                root: root.join(&target.root),
                extension: target.extension.clone(),
                prune_pattern,
            });
        }
        if let Some(missing) = Dialect::all().iter().find(|d| !seen.contains(*d)) {
            return Err(ConfigError::MissingDialect(*missing));
        }
        Ok(trees)
    }
}

/// `<root>/transync.yaml`: pure, no I/O.
pub fn layout_path_at(root: &Path) -> PathBuf {
    root.join(LAYOUT_FILE)
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load the layout for the repository at `root`.
///
/// Falls back to [`Layout::default`] when `transync.yaml` is absent.
pub fn load_at(root: &Path) -> Result<Layout, ConfigError> {
    let path = layout_path_at(root);
    if !path.exists() {
        return Ok(Layout::default());
    }
    load_from(&path)
}

/// Load a layout document from an explicit path.
///
/// Returns `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_from(path: &Path) -> Result<Layout, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
