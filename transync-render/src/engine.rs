//! Tera rendering engine for generated-file banners.
//!
//! # Template names
//!
//! | Name                      | Used for                                        |
//! |---------------------------|-------------------------------------------------|
//! | `preamble/python.tera`    | every generated Python fixture (python2/python3)|
//! | `preamble/php.tera`       | every generated PHP fixture                     |
//! | `header/precision.py.tera`| numeric-precision fixture, Python shims         |
//! | `header/precision.php.tera`| numeric-precision fixture, PHP shims           |
//! | `header/datetime.py.tera` | datetime fixture, Python imports                |
//! | `header/crypto.py.tera`   | crypto fixture, Python shims                    |
//! | `header/crypto.php.tera`  | crypto fixture, PHP shims                       |

use std::collections::HashMap;
use std::path::Path;

use tera::Tera;

use transync_core::Dialect;

use crate::context::BannerContext;
use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("preamble/python.tera", include_str!("templates/preamble/python.tera")),
    ("preamble/php.tera", include_str!("templates/preamble/php.tera")),
    (
        "header/precision.py.tera",
        include_str!("templates/header/precision.py.tera"),
    ),
    (
        "header/precision.php.tera",
        include_str!("templates/header/precision.php.tera"),
    ),
    (
        "header/datetime.py.tera",
        include_str!("templates/header/datetime.py.tera"),
    ),
    ("header/crypto.py.tera", include_str!("templates/header/crypto.py.tera")),
    ("header/crypto.php.tera", include_str!("templates/header/crypto.php.tera")),
];

/// Preamble template for a dialect.
pub fn preamble_name(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Python2 | Dialect::Python3 => "preamble/python.tera",
        Dialect::Php => "preamble/php.tera",
    }
}

/// Template name for a path relative to a template root: `/`-separated, lowercase.
fn template_name(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// Every `.tera` file below `dir`, keyed by [`template_name`].
fn read_overrides(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut found = Vec::new();
    if !dir.exists() {
        return Ok(found);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|e| io_err(&current, e))?;
        for entry in entries {
            let path = entry.map_err(|e| io_err(&current, e))?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|s| s.to_str()) != Some("tera") {
                continue;
            }
            let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            found.push((template_name(rel), contents));
        }
    }
    Ok(found)
}

fn build_tera(overrides: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, body)| (template_name(Path::new(name)), (*body).to_string()))
        .collect();
    if let Some(dir) = overrides {
        templates.extend(read_overrides(dir)?);
    }

    // Banners are source code, not HTML.
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for banners with optional on-disk overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults by relative name (e.g. `header/crypto.py.tera`).
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_overrides(None)
    }

    /// Embedded templates plus any overrides found in `user_template_dir`.
    pub fn with_overrides(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render one template by name.
    pub fn render(&self, name: &str, ctx: &BannerContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(name, &tera_ctx)?)
    }

    /// Render the dialect preamble followed by an optional header.
    pub fn render_banner(
        &self,
        dialect: Dialect,
        header: Option<&str>,
        ctx: &BannerContext,
    ) -> Result<String, RenderError> {
        let mut banner = self.render(preamble_name(dialect), ctx)?;
        if let Some(header) = header {
            banner.push_str(&self.render(header, ctx)?);
        }
        Ok(banner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
