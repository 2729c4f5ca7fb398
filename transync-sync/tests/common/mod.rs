#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::TempDir;
use transync_core::{
    DialectBodies, FragmentOptions, Layout, TranslateError, TranslationResult, Translator,
};

/// In-process stand-in for the external translator.
///
/// Units must contain `class <name> extends <base>`; a unit containing
/// `UNSUPPORTED` fails. Fragment bodies keep the bounded-block shapes of the
/// error hierarchy so repeated runs find their blocks again.
#[derive(Default)]
pub struct FakeTranslator {
    pub unit_calls: RefCell<Vec<String>>,
}

impl Translator for FakeTranslator {
    fn translate_unit(&self, source: &str) -> Result<TranslationResult, TranslateError> {
        self.unit_calls.borrow_mut().push(source.to_string());
        if source.contains("UNSUPPORTED") {
            return Err(TranslateError::Failed {
                status: Some(2),
                stderr: "unsupported construct".to_string(),
            });
        }
        let re = Regex::new(r"class (\w+) extends (\w+)").unwrap();
        let caps = re.captures(source).ok_or_else(|| TranslateError::Failed {
            status: Some(1),
            stderr: "no class declaration".to_string(),
        })?;
        Ok(TranslationResult {
            bodies: DialectBodies {
                python2: format!("# python2 {}\n", &caps[1]),
                python3: format!("# python3 {}\n", &caps[1]),
                php: format!("<?php\n// {}\n", &caps[1]),
            },
            class_name: caps[1].to_string(),
            base_class: caps[2].to_string(),
        })
    }

    fn translate_fragment(
        &self,
        source: &str,
        _options: &FragmentOptions,
    ) -> Result<DialectBodies, TranslateError> {
        let commented = |prefix: &str| {
            source
                .lines()
                .map(|l| format!("    {prefix} {l}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        Ok(DialectBodies {
            python2: format!("# python2\n{source}"),
            python3: format!("error_hierarchy = {{\n{}\n}}", commented("#")),
            php: format!("$error_hierarchy = array(\n{}\n);", commented("//")),
        })
    }
}

pub const DECLARATIONS: &str = "declare module 'ccxt' {\n\n    export class Exchange {}\n\n    export class Placeholder extends Exchange {}\n\n    export const version: string;\n}\n";

/// A temporary checkout with every file a full run reads.
pub struct Repo {
    pub dir: TempDir,
}

impl Repo {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let repo = Repo {
            dir: TempDir::new().expect("tempdir"),
        };
        repo.write(
            "js/base/errorHierarchy.js",
            "'use strict';\n\nconst errorHierarchy = {\n    'BaseError': {},\n}\n\nmodule.exports = errorHierarchy;\n",
        );
        repo.write(
            "js/test/base/functions/test.number.js",
            "'use strict';\n\nconst { decimalToPrecision, numberToString } = require ('../../../base/functions/number')\n\
             assert (decimalToPrecision ('1.5') === numberToString (1.5))\n",
        );
        repo.write(
            "js/test/base/functions/test.datetime.js",
            "const ccxt = require ('../../../../ccxt')\n/* datetime */\nassert (ccxt.iso8601 (0))\n",
        );
        repo.write(
            "js/test/base/functions/test.crypto.js",
            "'use strict'\n\nconst ccxt = require ('../../../../ccxt')\n\
             function equals (a, b) {\n    return true\n}\n\
             assert (equals (hash ('x'), 'y'))\n",
        );
        repo.write(
            "python/ccxt/base/errors.py",
            "error_hierarchy = {\n    'old': {},\n}\n\n\nclass BaseError(Exception):\n    pass\n",
        );
        repo.write(
            "php/errors.php",
            "<?php\n\nnamespace ccxt;\n\n$error_hierarchy = array(\n    'old',\n);\n",
        );
        repo.write("ccxt.d.ts", DECLARATIONS);
        repo.write(
            "python/test/test_async.py",
            "import asyncio\nimport ccxt.async_support as ccxt\n\n\
             async def main():\n    await asyncio.sleep(1)\n\n\
             asyncio.get_event_loop().run_until_complete(main())\n",
        );
        repo.allow(&[]);
        repo
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap_or_else(|e| panic!("read {rel}: {e}"))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Add a canonical unit `js/<id>.js` declaring `class <id> extends <base>`.
    pub fn unit(&self, id: &str, base: &str) -> &Self {
        self.write(
            &format!("js/{id}.js"),
            &format!("'use strict';\n\nmodule.exports = class {id} extends {base} {{}}\n"),
        );
        self
    }

    pub fn allow(&self, ids: &[&str]) -> &Self {
        let quoted: Vec<String> = ids.iter().map(|id| format!("\"{id}\"")).collect();
        self.write("exchanges.json", &format!("{{\"ids\": [{}]}}", quoted.join(", ")));
        self
    }

    pub fn layout(&self) -> Layout {
        transync_core::layout::load_at(self.root()).expect("layout")
    }
}
