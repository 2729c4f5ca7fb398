//! Domain types shared by every transync crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A canonical unit id: the source file basename without its extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for UnitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// A generated target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Python2,
    Python3,
    Php,
}

impl Dialect {
    /// All dialects in a stable order.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Python2, Dialect::Python3, Dialect::Php]
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Python2 => write!(f, "python2"),
            Dialect::Python3 => write!(f, "python3"),
            Dialect::Php => write!(f, "php"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source units and translation results
// ---------------------------------------------------------------------------

/// One canonical definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub id: UnitId,
    pub path: PathBuf,
    pub raw_text: String,
}

/// One body per target dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectBodies {
    pub python2: String,
    pub python3: String,
    pub php: String,
}

impl DialectBodies {
    pub fn get(&self, dialect: Dialect) -> &str {
        match dialect {
            Dialect::Python2 => &self.python2,
            Dialect::Python3 => &self.python3,
            Dialect::Php => &self.php,
        }
    }
}

/// Translator output for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    #[serde(flatten)]
    pub bodies: DialectBodies,
    pub class_name: String,
    pub base_class: String,
}

/// Options for [`Translator::translate_fragment`](crate::translator::Translator::translate_fragment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentOptions {
    pub remove_empty_lines: bool,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            remove_empty_lines: true,
        }
    }
}

// ---------------------------------------------------------------------------
// ClassRegistry
// ---------------------------------------------------------------------------

/// Ordered `class name → base class` mapping accumulated over one run.
///
/// Iteration order is insertion order. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassRegistry {
    entries: Vec<(String, String)>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class. Returns `false` (and leaves the registry untouched)
    /// when `class_name` is already registered.
    pub fn insert(&mut self, class_name: impl Into<String>, base_class: impl Into<String>) -> bool {
        let class_name = class_name.into();
        if self.contains(&class_name) {
            return false;
        }
        self.entries.push((class_name, base_class.into()));
        true
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, base)| (name.as_str(), base.as_str()))
    }
}

// ---------------------------------------------------------------------------
// TargetTree
// ---------------------------------------------------------------------------

/// One generated output directory, resolved against the repository root.
#[derive(Debug, Clone)]
pub struct TargetTree {
    pub dialect: Dialect,
    pub root: PathBuf,
    /// Extension (without the dot) of files generated from units.
    pub extension: String,
    /// File names matching this pattern are candidates for pruning.
    pub prune_pattern: Regex,
}

impl TargetTree {
    /// `<root>/<id>.<extension>`: pure, no I/O.
    pub fn output_path(&self, id: &UnitId) -> PathBuf {
        self.root.join(format!("{}.{}", id.0, self.extension))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
