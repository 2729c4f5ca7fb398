//! The Translator seam.
//!
//! The synchronizer never parses canonical source itself. It hands text to a
//! [`Translator`] and gets per-dialect bodies back. [`CommandTranslator`]
//! drives an external translator program over a JSON stdin/stdout protocol:
//!
//! ```text
//! <program> <args...> unit      stdin: {"source": "..."}
//!                               stdout: {"python2","python3","php","className","baseClass"}
//! <program> <args...> fragment  stdin: {"source": "...", "removeEmptyLines": bool}
//!                               stdout: {"python2","python3","php"}
//! ```
//!
//! A non-zero exit status means the input was rejected; stderr is carried in
//! the error.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::error::TranslateError;
use crate::layout::TranslatorConfig;
use crate::types::{DialectBodies, FragmentOptions, TranslationResult};

/// Converts canonical source text into per-dialect bodies.
///
/// Both operations fail by returning `Err`, never by returning a sentinel body.
pub trait Translator {
    /// Translate one complete exchange-client unit.
    fn translate_unit(&self, source: &str) -> Result<TranslationResult, TranslateError>;

    /// Translate a free-standing fragment (test fixtures, error hierarchy).
    fn translate_fragment(
        &self,
        source: &str,
        options: &FragmentOptions,
    ) -> Result<DialectBodies, TranslateError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FragmentRequest<'a> {
    source: &'a str,
    #[serde(flatten)]
    options: &'a FragmentOptions,
}

#[derive(Serialize)]
struct UnitRequest<'a> {
    source: &'a str,
}

/// [`Translator`] backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandTranslator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    /// Build from the layout's translator section; the program runs with the
    /// repository root as its working directory.
    pub fn from_config(config: &TranslatorConfig, root: &Path) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: Some(root.to_path_buf()),
        }
    }

    fn invoke(&self, mode: &str, payload: Vec<u8>) -> Result<Vec<u8>, TranslateError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(mode)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| TranslateError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        // Feed stdin from a separate thread so a chatty translator cannot
        // fill its stdout pipe while we are still writing.
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || -> std::io::Result<()> {
                stdin.write_all(&payload)?;
                stdin.flush()
            })
        });

        let output = child.wait_with_output()?;
        if let Some(handle) = writer {
            match handle.join() {
                Ok(result) => {
                    // A translator that exits early closes its stdin; the exit
                    // status below is the more useful diagnostic.
                    if output.status.success() {
                        result?;
                    }
                }
                Err(_) => {
                    return Err(TranslateError::Io(std::io::Error::other(
                        "translator stdin writer panicked",
                    )))
                }
            }
        }

        if !output.status.success() {
            return Err(TranslateError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl Translator for CommandTranslator {
    fn translate_unit(&self, source: &str) -> Result<TranslationResult, TranslateError> {
        let payload = serde_json::to_vec(&UnitRequest { source })?;
        let stdout = self.invoke("unit", payload)?;
        Ok(serde_json::from_slice(&stdout)?)
    }

    fn translate_fragment(
        &self,
        source: &str,
        options: &FragmentOptions,
    ) -> Result<DialectBodies, TranslateError> {
        let payload = serde_json::to_vec(&FragmentRequest { source, options })?;
        let stdout = self.invoke("fragment", payload)?;
        Ok(serde_json::from_slice(&stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_request_is_flat_camel_case() {
        let options = FragmentOptions {
            remove_empty_lines: false,
        };
        let json = serde_json::to_value(FragmentRequest {
            source: "x",
            options: &options,
        })
        .unwrap();
        assert_eq!(json["source"], "x");
        assert_eq!(json["removeEmptyLines"], false);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let translator = CommandTranslator::new("transync-no-such-translator", vec![]);
        let err = translator.translate_unit("class kraken extends Exchange {}").unwrap_err();
        assert!(matches!(err, TranslateError::Spawn { .. }), "got: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure_with_stderr() {
        let translator = CommandTranslator::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat >/dev/null; echo 'unsupported construct' >&2; exit 3".to_string(),
            ],
        );
        let err = translator.translate_unit("class kraken {}").unwrap_err();
        match err {
            TranslateError::Failed { status, stderr } => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "unsupported construct");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn fragment_response_is_parsed() {
        let translator = CommandTranslator::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"cat >/dev/null; printf '{"python2":"a","python3":"b","php":"c"}'"#.to_string(),
            ],
        );
        let bodies = translator
            .translate_fragment("x", &FragmentOptions::default())
            .expect("fragment");
        assert_eq!(bodies.php, "c");
    }

    #[cfg(unix)]
    #[test]
    fn garbage_on_stdout_is_a_protocol_error() {
        let translator = CommandTranslator::new(
            "sh",
            vec!["-c".to_string(), "cat >/dev/null; echo nope".to_string()],
        );
        let err = translator
            .translate_fragment("x", &FragmentOptions::default())
            .unwrap_err();
        assert!(matches!(err, TranslateError::Protocol(_)), "got: {err}");
    }
}
