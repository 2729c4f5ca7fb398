//! Derived Artifact Synchronizer.
//!
//! A fixture is a canonical JS file whose translation is spread over several
//! dialect artifacts. Every fixture goes through the same steps:
//!
//! 1. read the canonical source,
//! 2. apply its rewrite rules ([`apply_rules`]),
//! 3. optionally trim surrounding whitespace,
//! 4. translate it as a fragment,
//! 5. write each output, either a whole file (banner + body) or a bounded
//!    block substituted in place.
//!
//! The fixtures themselves are data: see [`FIXTURES`].

use std::path::Path;

use transync_core::{Dialect, FragmentOptions, Translator};
use transync_render::{BannerContext, TemplateEngine};

use crate::error::{compile, io_err, SyncError};
use crate::rules::{apply_rules, RewriteRule};
use crate::writer::{atomic_write, replace_block, WriteResult};

/// Where one translated body ends up. Paths are relative to the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureOutput {
    /// Whole file: dialect preamble, then `header` (a template name), then the body.
    File {
        dialect: Dialect,
        path: &'static str,
        header: Option<&'static str>,
    },
    /// Replace the first match of `pattern` in an existing hand-maintained file.
    Block {
        dialect: Dialect,
        path: &'static str,
        pattern: &'static str,
    },
}

impl FixtureOutput {
    pub fn path(&self) -> &'static str {
        match self {
            FixtureOutput::File { path, .. } | FixtureOutput::Block { path, .. } => *path,
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            FixtureOutput::File { dialect, .. } | FixtureOutput::Block { dialect, .. } => *dialect,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureSpec {
    pub name: &'static str,
    /// Canonical source, relative to the repository root.
    pub source: &'static str,
    pub rules: &'static [RewriteRule],
    pub options: FragmentOptions,
    pub trim: bool,
    pub outputs: &'static [FixtureOutput],
}

const USE_STRICT: RewriteRule = RewriteRule::optional(r"'use strict';?\s+", "");
const REQUIRE_LINES: RewriteRule = RewriteRule::optional(r"[^\n]+require[^\n]+\n", "");

const TEST_OPTIONS: FragmentOptions = FragmentOptions {
    remove_empty_lines: false,
};

/// Every derived fixture, in the order a run synchronizes them.
pub const FIXTURES: &[FixtureSpec] = &[
    FixtureSpec {
        name: "error-hierarchy",
        source: "js/base/errorHierarchy.js",
        rules: &[RewriteRule::required(r"(?s)module\.exports = [^;]+;\n", "")],
        options: FragmentOptions {
            remove_empty_lines: true,
        },
        trim: true,
        outputs: &[
            FixtureOutput::Block {
                dialect: Dialect::Python3,
                path: "python/ccxt/base/errors.py",
                pattern: r"(?s)error_hierarchy = .+?\n\}",
            },
            FixtureOutput::Block {
                dialect: Dialect::Php,
                path: "php/errors.php",
                pattern: r"(?s)\$error_hierarchy = .+?\n\);",
            },
        ],
    },
    FixtureSpec {
        name: "precision",
        source: "js/test/base/functions/test.number.js",
        rules: &[
            USE_STRICT,
            REQUIRE_LINES,
            RewriteRule::required("decimalToPrecision", "decimal_to_precision"),
            RewriteRule::required("numberToString", "number_to_string"),
        ],
        options: TEST_OPTIONS,
        trim: false,
        outputs: &[
            FixtureOutput::File {
                dialect: Dialect::Python2,
                path: "python/test/test_decimal_to_precision.py",
                header: Some("header/precision.py.tera"),
            },
            FixtureOutput::File {
                dialect: Dialect::Php,
                path: "php/test/decimal_to_precision.php",
                header: Some("header/precision.php.tera"),
            },
        ],
    },
    FixtureSpec {
        name: "datetime",
        source: "js/test/base/functions/test.datetime.js",
        rules: &[REQUIRE_LINES, RewriteRule::optional(r"(?m)^/\*.*\s+", "")],
        options: TEST_OPTIONS,
        trim: false,
        outputs: &[
            FixtureOutput::File {
                dialect: Dialect::Python2,
                path: "python/test/test_exchange_datetime_functions.py",
                header: Some("header/datetime.py.tera"),
            },
            FixtureOutput::File {
                dialect: Dialect::Php,
                path: "php/test/test_exchange_datetime_functions.php",
                header: None,
            },
        ],
    },
    FixtureSpec {
        name: "crypto",
        source: "js/test/base/functions/test.crypto.js",
        rules: &[
            USE_STRICT,
            REQUIRE_LINES,
            RewriteRule::required(r"function equals \([\S\s]+?return true\n\}\n", ""),
        ],
        options: TEST_OPTIONS,
        trim: false,
        outputs: &[
            FixtureOutput::File {
                dialect: Dialect::Python2,
                path: "python/test/test_crypto.py",
                header: Some("header/crypto.py.tera"),
            },
            FixtureOutput::File {
                dialect: Dialect::Php,
                path: "php/test/test_crypto.php",
                header: Some("header/crypto.php.tera"),
            },
        ],
    },
];

/// Rewrite (and trim, if asked) a canonical fixture source.
pub fn prepare_source(spec: &FixtureSpec, text: &str) -> Result<String, SyncError> {
    let rewritten = apply_rules(spec.name, text, spec.rules)?;
    Ok(if spec.trim {
        rewritten.trim().to_string()
    } else {
        rewritten
    })
}

/// Translate one fixture and write all of its outputs under `root`.
pub fn sync_fixture(
    root: &Path,
    spec: &FixtureSpec,
    translator: &dyn Translator,
    engine: &TemplateEngine,
    dry_run: bool,
) -> Result<Vec<WriteResult>, SyncError> {
    let source_path = root.join(spec.source);
    tracing::info!("transpiling from {}", source_path.display());

    let text = std::fs::read_to_string(&source_path).map_err(|e| io_err(&source_path, e))?;
    let prepared = prepare_source(spec, &text)?;
    let bodies = translator
        .translate_fragment(&prepared, &spec.options)
        .map_err(|e| SyncError::FixtureTranslation {
            fixture: spec.name.to_string(),
            source: e,
        })?;

    let ctx = BannerContext::new(spec.source);
    let mut writes = Vec::with_capacity(spec.outputs.len());
    for output in spec.outputs {
        let path = root.join(output.path());
        let body = bodies.get(output.dialect());
        let result = match output {
            FixtureOutput::File { dialect, header, .. } => {
                let mut content = engine.render_banner(*dialect, *header, &ctx)?;
                content.push_str(body);
                atomic_write(&path, &content, dry_run)?
            }
            FixtureOutput::Block { pattern, .. } => {
                let re = compile(pattern)?;
                replace_block(&path, &re, body, dry_run)?
            }
        };
        tracing::debug!("{} -> {}", spec.name, path.display());
        writes.push(result);
    }
    Ok(writes)
}
