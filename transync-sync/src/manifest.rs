//! Type Manifest Exporter: keeps the `export class` block of the public
//! declarations file in step with the run's class registry.

use std::path::Path;

use transync_core::ClassRegistry;

use crate::error::{compile, SyncError};
use crate::writer::{replace_block, WriteResult};

/// One or more consecutive `    export class X extends Y {}` lines.
pub const DECLARATION_BLOCK: &str = r"(?:    export class \S+ extends \S+ \{\}\r?\n)+";

/// The replacement block: one line per registry entry, in registry order.
pub fn render_declarations(registry: &ClassRegistry) -> String {
    let mut block = registry
        .iter()
        .map(|(class_name, base_class)| format!("    export class {class_name} extends {base_class} {{}}"))
        .collect::<Vec<_>>()
        .join("\n");
    block.push('\n');
    block
}

/// Substitute the declaration block of `path` with `registry`.
pub fn export_declarations(
    path: &Path,
    registry: &ClassRegistry,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    tracing::info!("exporting {} class declarations to {}", registry.iter().count(), path.display());
    let pattern = compile(DECLARATION_BLOCK)?;
    replace_block(path, &pattern, &render_declarations(registry), dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DECLARATIONS: &str = "declare module 'ccxt' {\n\
        \n    export class Exchange {}\n\
        \n    export class Foo extends Base1 {}\
        \n    export class Bar extends Base2 {}\
        \n    export class Baz extends Base3 {}\
        \n\n    export const version: string;\n}\n";

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.insert("Foo", "Base1");
        registry.insert("Bar", "Base2");
        registry
    }

    #[test]
    fn renders_one_line_per_entry_in_order() {
        assert_eq!(
            render_declarations(&registry()),
            "    export class Foo extends Base1 {}\n    export class Bar extends Base2 {}\n"
        );
    }

    #[test]
    fn block_is_fully_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ccxt.d.ts");
        fs::write(&path, DECLARATIONS).unwrap();

        export_declarations(&path, &registry(), false).unwrap();

        let updated = fs::read_to_string(&path).unwrap();
        assert!(!updated.contains("Baz"), "stale entry left behind:\n{updated}");
        assert!(updated.contains(
            "\n    export class Foo extends Base1 {}\n    export class Bar extends Base2 {}\n\n    export const version"
        ));
        assert!(updated.contains("    export class Exchange {}\n"));
    }

    #[test]
    fn crlf_block_is_matched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ccxt.d.ts");
        fs::write(&path, "{\r\n    export class Old extends Exchange {}\r\n}\r\n").unwrap();

        export_declarations(&path, &registry(), false).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\r\n    export class Foo extends Base1 {}\n    export class Bar extends Base2 {}\n}\r\n"
        );
    }

    #[test]
    fn rerun_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ccxt.d.ts");
        fs::write(&path, DECLARATIONS).unwrap();
        export_declarations(&path, &registry(), false).unwrap();
        let second = export_declarations(&path, &registry(), false).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn missing_block_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ccxt.d.ts");
        fs::write(&path, "declare module 'ccxt' {}\n").unwrap();
        let err = export_declarations(&path, &registry(), false).unwrap_err();
        assert!(matches!(err, SyncError::BlockNotFound { .. }));
    }
}
