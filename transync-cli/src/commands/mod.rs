pub mod diff;
pub mod sync;
pub mod units;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use transync_core::{layout, CommandTranslator, Layout};

/// Repository root, its layout and the translator every command shares.
pub struct Workspace {
    pub root: PathBuf,
    pub layout: Layout,
    pub translator: CommandTranslator,
}

pub fn load_workspace(root: Option<&Path>, config: Option<&Path>) -> Result<Workspace> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("could not determine current directory")?,
    };
    let layout = match config {
        Some(path) => layout::load_from(path)
            .with_context(|| format!("failed to load layout from {}", path.display()))?,
        None => layout::load_at(&root)
            .with_context(|| format!("failed to load layout for {}", root.display()))?,
    };
    let translator = CommandTranslator::from_config(&layout.translator, &root);
    Ok(Workspace {
        root,
        layout,
        translator,
    })
}

/// `path` relative to `root`, for display.
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
