//! Source Set Resolver: which canonical units take part in a run.

use std::path::Path;

use transync_core::{AllowList, SourceUnit, UnitId};

use crate::error::{io_err, SyncError};

/// Normalise a single-unit filter to a bare id.
///
/// Accepts `kraken`, `kraken.js` or `js/kraken.js`.
pub fn normalize_filter(filter: &str, extension: &str) -> String {
    let name = Path::new(filter)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filter.to_string());
    let suffix = format!(".{extension}");
    match name.strip_suffix(&suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

/// List the units to process, ordered by file name.
///
/// A unit is a regular file in `source_dir` with `extension` whose id is in
/// the allow-list (and equal to `filter`, when given). An empty result is a
/// valid outcome.
pub fn resolve_units(
    source_dir: &Path,
    extension: &str,
    allow_list: &AllowList,
    filter: Option<&str>,
) -> Result<Vec<SourceUnit>, SyncError> {
    let wanted = filter.map(|f| normalize_filter(f, extension));

    let mut entries: Vec<_> = std::fs::read_dir(source_dir)
        .map_err(|e| io_err(source_dir, e))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut units = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !allow_list.contains(id) {
            tracing::debug!("not allow-listed: {}", path.display());
            continue;
        }
        if wanted.as_deref().is_some_and(|w| w != id) {
            continue;
        }
        let raw_text = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        units.push(SourceUnit {
            id: UnitId::from(id),
            path,
            raw_text,
        });
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source_tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), format!("// {name}\n")).unwrap();
        }
        dir
    }

    fn ids(units: &[SourceUnit]) -> Vec<&str> {
        units.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn filter_accepts_id_file_name_and_path() {
        assert_eq!(normalize_filter("kraken", "js"), "kraken");
        assert_eq!(normalize_filter("kraken.js", "js"), "kraken");
        assert_eq!(normalize_filter("js/kraken.js", "js"), "kraken");
        assert_eq!(normalize_filter(".js", "js"), ".js");
    }

    #[test]
    fn only_allow_listed_units_in_name_order() {
        let dir = source_tree(&["kraken.js", "binance.js", "bitfinex.js"]);
        let allow = AllowList::new(["kraken", "binance"]).unwrap();
        let units = resolve_units(dir.path(), "js", &allow, None).unwrap();
        assert_eq!(ids(&units), vec!["binance", "kraken"]);
        assert_eq!(units[1].raw_text, "// kraken.js\n");
    }

    #[test]
    fn other_extensions_and_directories_are_ignored() {
        let dir = source_tree(&["kraken.js", "kraken.json", "binance.ts"]);
        fs::create_dir_all(dir.path().join("base.js")).unwrap();
        let allow = AllowList::new(["kraken", "binance", "base"]).unwrap();
        let units = resolve_units(dir.path(), "js", &allow, None).unwrap();
        assert_eq!(ids(&units), vec!["kraken"]);
    }

    #[test]
    fn filter_restricts_to_one_unit() {
        let dir = source_tree(&["kraken.js", "binance.js"]);
        let allow = AllowList::new(["kraken", "binance"]).unwrap();
        let units = resolve_units(dir.path(), "js", &allow, Some("kraken.js")).unwrap();
        assert_eq!(ids(&units), vec!["kraken"]);
    }

    #[test]
    fn filter_outside_allow_list_matches_nothing() {
        let dir = source_tree(&["kraken.js", "binance.js"]);
        let allow = AllowList::new(["kraken"]).unwrap();
        let units = resolve_units(dir.path(), "js", &allow, Some("binance")).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn missing_source_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let allow = AllowList::new(["kraken"]).unwrap();
        let err = resolve_units(&dir.path().join("js"), "js", &allow, None).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
