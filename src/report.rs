//! Outcome bookkeeping shared by the batch jobs and converters.

use crate::error::Error;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
/// What happened to a single file.
pub enum FileOutcome {
    /// The file was (re)written.
    Written,
    /// The file needed no changes.
    Unchanged,
    /// The file was deliberately left alone.
    Skipped(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-file results of a run.
///
/// Only `failed` affects the exit status; skipped inputs are reported but tolerated.
pub struct BatchReport {
    /// Files that were written.
    pub written: Vec<PathBuf>,
    /// Files that were already in shape.
    pub unchanged: Vec<PathBuf>,
    /// Inputs left alone because their content could not be used.
    pub skipped: Vec<PathBuf>,
    /// Files that still failed after all retries.
    pub failed: Vec<PathBuf>,
}

impl BatchReport {
    #[must_use]
    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// File the outcome of one file under the matching list.
    pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Written => {
                tracing::info!(path = %path.display(), "written");
                self.written.push(path);
            }
            FileOutcome::Unchanged => {
                tracing::info!(path = %path.display(), "no changes needed");
                self.unchanged.push(path);
            }
            FileOutcome::Skipped(reason) => {
                tracing::warn!(path = %path.display(), %reason, "skipped");
                self.skipped.push(path);
            }
        }
    }

    /// Record an input that could not be used.
    pub fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        self.record(path.to_path_buf(), FileOutcome::Skipped(reason.into()));
    }

    /// Record a file that failed for good.
    pub fn fail(&mut self, path: PathBuf, err: &Error) {
        tracing::error!(path = %path.display(), %err, "failed");
        self.failed.push(path);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }

    /// Log totals and, if any, the files that failed.
    pub fn log_summary(&self, job: &str) {
        tracing::info!(
            job,
            written = self.written.len(),
            unchanged = self.unchanged.len(),
            skipped = self.skipped.len(),
            failed = self.failed.len(),
            "finished"
        );
        for path in &self.failed {
            tracing::warn!(job, path = %path.display(), "could not be processed");
        }
    }
}
