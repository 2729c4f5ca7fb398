//! Async-to-Sync Rewriter: derives the blocking Python sample script from its
//! asyncio counterpart.

use std::path::Path;

use regex::Regex;

use transync_core::layout::AsyncSampleConfig;

use crate::error::{compile, io_err, SyncError};
use crate::writer::{atomic_write, WriteResult};

/// Literal per-line substitutions, applied before keyword stripping.
const LINE_REPLACEMENTS: &[(&str, &str)] = &[
    ("asyncio.get_event_loop().run_until_complete(main())", "main()"),
    ("import ccxt.async_support as ccxt", "import ccxt"),
    ("await asyncio.sleep", "time.sleep"),
];

const KEYWORDS: &str = r"\b(?:async|await) ";

/// Rewrite async sample `text` into its synchronous form.
///
/// Lines that are exactly `import asyncio`, or that mention `token_bucket`,
/// are dropped. Every `async `/`await ` token goes. Each helper in
/// `dropped_helpers` loses its definition (up to the next `#`) and every
/// `<whitespace><helper>(exchange)` call.
pub fn rewrite_async_to_sync(text: &str, dropped_helpers: &[String]) -> Result<String, SyncError> {
    let keywords = compile(KEYWORDS)?;

    let lines: Vec<String> = text
        .split('\n')
        .filter(|line| *line != "import asyncio" && !line.contains("token_bucket"))
        .map(|line| {
            let replaced = LINE_REPLACEMENTS
                .iter()
                .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to));
            keywords.replace_all(&replaced, "").into_owned()
        })
        .collect();

    let mut contents = lines.join("\n");
    for helper in dropped_helpers {
        contents = delete_function(&contents, helper)?;
    }
    Ok(contents)
}

fn delete_function(text: &str, name: &str) -> Result<String, SyncError> {
    let name = regex::escape(name);
    let definition = compile(&format!("def {name}[^#]+"))?;
    let call = compile(&format!(r"\s+{name}\(exchange\)"))?;
    Ok(strip(&call, &strip(&definition, text)))
}

fn strip(re: &Regex, text: &str) -> String {
    re.replace_all(text, "").into_owned()
}

/// Read the async sample under `root` and write its sync variant.
pub fn sync_async_sample(
    root: &Path,
    config: &AsyncSampleConfig,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let source = root.join(&config.source);
    let target = root.join(&config.target);
    tracing::info!("transpiling {} -> {}", source.display(), target.display());

    let text = std::fs::read_to_string(&source).map_err(|e| io_err(&source, e))?;
    let rewritten = rewrite_async_to_sync(&text, &config.dropped_helpers)?;
    atomic_write(&target, &rewritten, dry_run)
}
