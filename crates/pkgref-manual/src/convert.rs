//! External manual conversion.
//!
//! The conversion program runs synchronously and writes HTML into the output
//! directory. Exit status 127 (the shell's "command not found") and a spawn
//! failure with `NotFound` are reported as a missing program; any other
//! non-zero status is a conversion failure carrying the program's stderr.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Error type for manual conversion.
#[derive(Debug, thiserror::Error)]
pub enum ManualError {
    /// The conversion program is not installed.
    #[error("Manual conversion program not found: {0}")]
    ProgramNotFound(String),
    /// The program could not be started for another reason.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The program ran and reported failure.
    #[error("{program} failed with status {status}: {message}")]
    ConversionFailed {
        /// Program name.
        program: String,
        /// Exit status code.
        status: i32,
        /// Trimmed stderr of the program.
        message: String,
    },
    /// The program was killed before reporting a status.
    #[error("{0} terminated by a signal")]
    Terminated(String),
    /// No single HTML entry page could be determined.
    #[error("Cannot determine the manual entry page in {}", .0.display())]
    AmbiguousEntry(PathBuf),
    /// Output directory handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the external manual-conversion program.
pub struct ManualConverter {
    program: String,
}

impl ManualConverter {
    /// Create a converter invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Convert `source` into `output_dir` and return the entry page.
    ///
    /// The entry page is resolved by trying, in order: `index.html`, the
    /// source's base name with an `.html` extension, and — when the output
    /// directory holds exactly one HTML file — that file.
    pub fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, ManualError> {
        std::fs::create_dir_all(output_dir)?;

        let result = Command::new(&self.program)
            .arg(source)
            .arg("-o")
            .arg(output_dir)
            .output();
        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ManualError::ProgramNotFound(self.program.clone()));
            }
            Err(e) => {
                return Err(ManualError::Spawn {
                    program: self.program.clone(),
                    source: e,
                });
            }
        };

        match output.status.code() {
            Some(0) => {}
            Some(127) => return Err(ManualError::ProgramNotFound(self.program.clone())),
            Some(status) => {
                return Err(ManualError::ConversionFailed {
                    program: self.program.clone(),
                    status,
                    message: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                });
            }
            None => return Err(ManualError::Terminated(self.program.clone())),
        }

        tracing::debug!(source = %source.display(), "Manual converted");
        resolve_entry(source, output_dir)
    }
}

/// Locate the converted manual's entry page in `output_dir`.
fn resolve_entry(source: &Path, output_dir: &Path) -> Result<PathBuf, ManualError> {
    let index = output_dir.join("index.html");
    if index.is_file() {
        return Ok(index);
    }

    if let Some(stem) = source.file_stem() {
        let named = output_dir.join(format!("{}.html", stem.to_string_lossy()));
        if named.is_file() {
            return Ok(named);
        }
    }

    let mut pages = html_files(output_dir)?;
    if pages.len() == 1 {
        return Ok(pages.remove(0));
    }
    Err(ManualError::AmbiguousEntry(output_dir.to_path_buf()))
}

/// All HTML files directly inside `dir`, sorted for determinism.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, "<html></html>").unwrap();
    }

    #[test]
    fn entry_prefers_index_html() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("index.html"));
        touch(&dir.path().join("manual.html"));

        let entry = resolve_entry(Path::new("doc/manual.texi"), dir.path()).unwrap();
        assert_eq!(entry, dir.path().join("index.html"));
    }

    #[test]
    fn entry_falls_back_to_source_basename() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("manual.html"));
        touch(&dir.path().join("appendix.html"));

        let entry = resolve_entry(Path::new("doc/manual.texi"), dir.path()).unwrap();
        assert_eq!(entry, dir.path().join("manual.html"));
    }

    #[test]
    fn entry_accepts_a_single_html_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("anything.html"));

        let entry = resolve_entry(Path::new("doc/manual.texi"), dir.path()).unwrap();
        assert_eq!(entry, dir.path().join("anything.html"));
    }

    #[test]
    fn entry_ambiguity_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("one.html"));
        touch(&dir.path().join("two.html"));

        let result = resolve_entry(Path::new("doc/manual.texi"), dir.path());
        assert!(matches!(result, Err(ManualError::AmbiguousEntry(_))));
    }

    #[test]
    fn missing_program_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let converter = ManualConverter::new("pkgref-no-such-converter");

        let result = converter.convert(Path::new("manual.texi"), dir.path());
        match result {
            Err(ManualError::ProgramNotFound(program)) => {
                assert_eq!(program, "pkgref-no-such-converter");
            }
            other => panic!("expected ProgramNotFound, got {other:?}"),
        }
    }

    #[test]
    fn exit_status_127_is_reported_as_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("manual.texi");
        std::fs::write(&script, "exit 127\n").unwrap();

        // `sh <source> -o <dir>` runs the source as a script.
        let converter = ManualConverter::new("sh");
        let result = converter.convert(&script, &dir.path().join("out"));
        assert!(matches!(result, Err(ManualError::ProgramNotFound(_))));
    }

    #[test]
    fn nonzero_exit_status_is_a_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("manual.texi");
        std::fs::write(&script, "echo boom >&2\nexit 2\n").unwrap();

        let converter = ManualConverter::new("sh");
        let result = converter.convert(&script, &dir.path().join("out"));
        match result {
            Err(ManualError::ConversionFailed {
                status, message, ..
            }) => {
                assert_eq!(status, 2);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ConversionFailed, got {other:?}"),
        }
    }

    #[test]
    fn successful_conversion_resolves_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = dir.path().join("manual.texi");
        // The script plays the converter: `sh <source> -o <dir>` makes the
        // output directory $2.
        std::fs::write(
            &script,
            "mkdir -p \"$2\" && echo '<html></html>' > \"$2/index.html\"\n",
        )
        .unwrap();

        let converter = ManualConverter::new("sh");
        let entry = converter.convert(&script, &out).unwrap();
        assert_eq!(entry, out.join("index.html"));
    }
}
