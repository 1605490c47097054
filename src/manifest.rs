//! Served artifacts: one JSON payload per section plus a manifest that lists them in order.
//!
//! The manifest is all a client needs on first load; section payloads are fetched by id when
//! they are about to be shown, so the initial download does not grow with the content.

use crate::comments::CommentSyntax;
use crate::error::{Error, Result};
use crate::formats::json::{read_section, write_json};
use crate::naming::order_prefix;
use crate::normalize::normalize_section;
use crate::report::{BatchReport, FileOutcome};
use crate::retry::RetryPolicy;
use crate::section::{ManifestEntry, Section};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory below the output root that holds the per-section payloads.
pub const SECTIONS_DIR: &str = "sections";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Shape of the manifest rows.
pub enum ManifestStyle {
    /// `{id, title}` only.
    Compact,
    /// `{id, title, orderPrefix, filePath}`.
    Rich,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A normalized section ready to be served, with its id and rank.
pub struct SectionPayload {
    /// Stable section id.
    pub id: String,
    /// Zero-padded rank of the section.
    pub order_prefix: String,
    /// The data written to `sections/<id>.json`.
    pub section: Section,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where and how the served artifacts are written.
pub struct SiteLayout {
    /// Output root; payloads go to `<root>/sections/`.
    pub output_dir: PathBuf,
    /// Manifest file name inside the output root.
    pub manifest_file: String,
    /// URL prefix under which the output root is served, e.g. `/data`.
    pub fetch_prefix: String,
    /// Row shape of the manifest.
    pub style: ManifestStyle,
}

impl SiteLayout {
    #[must_use]
    /// Path of a section payload on disk.
    pub fn section_path(&self, id: &str) -> PathBuf {
        self.output_dir.join(SECTIONS_DIR).join(format!("{id}.json"))
    }

    #[must_use]
    /// Path of the manifest on disk.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_file)
    }
}

#[must_use]
/// Fetch-relative locator of a section payload: `<prefix>/sections/<id>.json`.
pub fn fetch_path(fetch_prefix: &str, id: &str) -> String {
    format!(
        "{}/{SECTIONS_DIR}/{id}.json",
        fetch_prefix.trim_end_matches('/')
    )
}

#[must_use]
/// Manifest rows for `sections`, in the given order.
///
/// Ids are unique in the result: a repeated id keeps its first occurrence.
pub fn build_manifest(
    sections: &[SectionPayload],
    style: ManifestStyle,
    fetch_prefix: &str,
) -> Vec<ManifestEntry> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .filter(|payload| {
            let fresh = seen.insert(payload.id.as_str());
            if !fresh {
                tracing::warn!(id = %payload.id, "duplicate section id left out of manifest");
            }
            fresh
        })
        .map(|payload| {
            let rich = style == ManifestStyle::Rich;
            ManifestEntry {
                id: payload.id.clone(),
                title: payload.section.title.clone(),
                order_prefix: rich.then(|| payload.order_prefix.clone()),
                file_path: rich.then(|| fetch_path(fetch_prefix, &payload.id)),
            }
        })
        .collect()
}

/// Create `dir` and its parents, treating failure as fatal for the run.
///
/// # Errors
///
/// Returns [`Error::FatalDir`] if the directory cannot be created.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::FatalDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write every section payload and then the manifest.
///
/// A section whose payload cannot be written after retries is left out of the manifest, so the
/// manifest never points at a missing file.
///
/// # Errors
///
/// Returns [`Error::FatalDir`] if the output directories cannot be created; everything else is
/// recorded in the returned report.
pub fn write_site(
    sections: &[SectionPayload],
    layout: &SiteLayout,
    policy: &RetryPolicy,
) -> Result<BatchReport> {
    ensure_output_dir(&layout.output_dir.join(SECTIONS_DIR))?;

    let mut report = BatchReport::default();
    let mut served = Vec::with_capacity(sections.len());

    for payload in sections {
        let path = layout.section_path(&payload.id);
        match policy.run(&payload.id, |_| write_json(&path, &payload.section)) {
            Ok(()) => {
                report.record(path, FileOutcome::Written);
                served.push(payload.clone());
            }
            Err(err) => report.fail(path, &err),
        }
    }

    let manifest = build_manifest(&served, layout.style, &layout.fetch_prefix);
    let manifest_path = layout.manifest_path();
    match policy.run("manifest", |_| write_json(&manifest_path, &manifest)) {
        Ok(()) => report.record(manifest_path, FileOutcome::Written),
        Err(err) => report.fail(manifest_path, &err),
    }

    Ok(report)
}

/// Read the raw JSON section for each id in `order`, normalize it and serve it.
///
/// Missing, blank and malformed section files are skipped with a warning. Section ranks count
/// only the sections that were read.
///
/// # Errors
///
/// Returns [`Error::FatalDir`] if the output directories cannot be created.
pub fn bundle(
    json_dir: &Path,
    order: &[String],
    layout: &SiteLayout,
    syntax: &CommentSyntax,
    policy: &RetryPolicy,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    let mut payloads = Vec::new();
    let mut seen = HashSet::new();

    for id in order {
        if !seen.insert(id.as_str()) {
            tracing::warn!(id = %id, "section listed twice in the order; keeping the first");
            continue;
        }
        let source = json_dir.join(format!("{id}.json"));
        if !source.exists() {
            report.skip(&source, "source file not found");
            continue;
        }

        let raw = match policy.run(id, |_| read_section(&source)) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                report.skip(&source, "source file is empty");
                continue;
            }
            Err(err) if err.is_retryable() => {
                report.fail(source, &err);
                continue;
            }
            Err(err) => {
                report.skip(&source, err.to_string());
                continue;
            }
        };

        let section = normalize_section(raw, syntax);
        tracing::info!(
            id = %id,
            examples = section.code_examples.len(),
            "normalized section"
        );
        payloads.push(SectionPayload {
            id: id.clone(),
            order_prefix: order_prefix(payloads.len()),
            section,
        });
    }

    report.merge(write_site(&payloads, layout, policy)?);
    Ok(report)
}

#[cfg(test)]
#[path = "tests/manifest.rs"]
mod tests;
