//! In-place batch rewrites with per-file retries.
//!
//! A batch never stops at a bad file: parse problems are logged and skipped, I/O problems are
//! retried and, once retries are exhausted, recorded as failures. The report tells the caller
//! whether the run as a whole succeeded.

use crate::comments::CommentSyntax;
use crate::error::{Error, Result};
use crate::formats::json::{parse_json, write_json};
use crate::input;
use crate::report::{BatchReport, FileOutcome};
use crate::retry::RetryPolicy;
use crate::section::Section;
use std::fs;
use std::path::{Path, PathBuf};

/// Run `job` over `files` in order, retrying each file according to `policy`.
pub fn run_batch(
    files: Vec<PathBuf>,
    policy: &RetryPolicy,
    mut job: impl FnMut(&Path) -> Result<FileOutcome>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for path in files {
        let label = path.display().to_string();
        tracing::info!(path = %label, "processing");
        match policy.run(&label, |_| job(&path)) {
            Ok(outcome) => report.record(path, outcome),
            Err(err) if err.is_retryable() => report.fail(path, &err),
            Err(err) => report.record(path, FileOutcome::Skipped(err.to_string())),
        }
    }

    report
}

/// Hoist trailing comments in every example of one section file, rewriting it if anything moved.
///
/// # Errors
///
/// Returns [`Error::Io`] on read/write failure and [`Error::Json`] if the file is not a section.
pub fn hoist_comments_in_file(path: &Path, syntax: &CommentSyntax) -> Result<FileOutcome> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut section: Section = parse_json(&text, path)?;

    let mut modified = false;
    for example in &mut section.code_examples {
        if let Some(code) = syntax.hoist_trailing_comments(&example.code) {
            example.code = code;
            modified = true;
        }
    }

    if modified {
        write_json(path, &section)?;
        Ok(FileOutcome::Written)
    } else {
        Ok(FileOutcome::Unchanged)
    }
}

/// Hoist trailing comments in every `*.json` section file directly inside `dir`.
///
/// # Errors
///
/// Returns [`Error::Io`] only if `dir` itself cannot be listed; per-file problems are reported
/// in the [`BatchReport`].
pub fn split_comments_in_dir(
    dir: &Path,
    syntax: &CommentSyntax,
    policy: &RetryPolicy,
) -> Result<BatchReport> {
    let files = input::list_files(dir, "json")?;
    tracing::info!(dir = %dir.display(), files = files.len(), "separating trailing comments");
    Ok(run_batch(files, policy, |path| {
        hoist_comments_in_file(path, syntax)
    }))
}

#[cfg(test)]
#[path = "tests/rewrite.rs"]
mod tests;
