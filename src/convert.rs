//! Batch conversion between the JSON and Markdown authoring formats.
//!
//! JSON → Markdown writes one directory per section in the declared order and one file per
//! normalized example. Markdown → JSON reads that layout back, recovering order from the rank
//! prefixes, and serves the result with a rich manifest.

use crate::comments::CommentSyntax;
use crate::document::{parse_document, render_document, DocumentStyle};
use crate::error::{Error, Result};
use crate::formats::json::read_section;
use crate::input;
use crate::manifest::{ensure_output_dir, write_site, SectionPayload, SiteLayout};
use crate::naming::{chapter_dir_name, example_file_name, parse_example_path, title_from_id};
use crate::normalize::normalize_section;
use crate::report::{BatchReport, FileOutcome};
use crate::retry::RetryPolicy;
use crate::section::{ParsedExample, Section};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Write the Markdown layout for every section id in `order`.
///
/// Comment-only blocks are folded into descriptions before writing, so each file holds one
/// example. Sections whose JSON is missing or unusable are skipped and do not consume a rank.
///
/// # Errors
///
/// Returns [`Error::FatalDir`] if `markdown_dir` cannot be created.
pub fn json_to_markdown(
    json_dir: &Path,
    markdown_dir: &Path,
    order: &[String],
    syntax: &CommentSyntax,
    style: &DocumentStyle,
    policy: &RetryPolicy,
) -> Result<BatchReport> {
    ensure_output_dir(markdown_dir)?;

    let mut report = BatchReport::default();
    let mut chapter_index = 0;

    for id in order {
        let source = json_dir.join(format!("{id}.json"));
        if !source.exists() {
            report.skip(&source, "JSON file not found");
            continue;
        }

        let raw = match policy.run(id, |_| read_section(&source)) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                report.skip(&source, "JSON file is empty");
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

        let raw_count = raw.code_examples.len();
        let section = normalize_section(raw, syntax);
        let chapter_path = markdown_dir.join(chapter_dir_name(chapter_index, id));
        let tags = vec![id.clone()];

        for (index, example) in section.code_examples.iter().enumerate() {
            let path = chapter_path.join(example_file_name(index, &example.title));
            let content = render_document(example, &tags, style);
            let written = policy.run(&path.display().to_string(), |_| {
                fs::create_dir_all(&chapter_path).map_err(|e| Error::io(&chapter_path, e))?;
                fs::write(&path, &content).map_err(|e| Error::io(&path, e))
            });
            match written {
                Ok(()) => report.record(path, FileOutcome::Written),
                Err(err) => report.fail(path, &err),
            }
        }

        tracing::info!(
            id = %id,
            raw = raw_count,
            files = section.code_examples.len(),
            "converted section"
        );
        chapter_index += 1;
    }

    Ok(report)
}

/// Read one Markdown example together with the ordering recovered from its path.
///
/// # Errors
///
/// Returns [`Error::Layout`] for paths outside the `NNN_<chapter>/NNN_<slug>.md` layout,
/// [`Error::Io`] if the file cannot be read, and the parse errors of [`parse_document`].
pub fn read_example(path: &Path, style: &DocumentStyle) -> Result<ParsedExample> {
    let info = parse_example_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = parse_document(&content, style)?;

    let mut tags = vec![info.chapter_id.clone()];
    for tag in document.tags.unwrap_or_default() {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Ok(ParsedExample {
        example: document.example,
        tags,
        chapter_id: info.chapter_id,
        chapter_prefix: info.chapter_prefix,
        example_prefix: info.example_prefix,
        file_path: path.to_path_buf(),
    })
}

/// Parse every example file below `markdown_dir`, skipping the ones that cannot be used.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory tree cannot be walked.
pub fn collect_examples(
    markdown_dir: &Path,
    style: &DocumentStyle,
    policy: &RetryPolicy,
    report: &mut BatchReport,
) -> Result<Vec<ParsedExample>> {
    let files = input::find_documents(markdown_dir, "md")?;
    tracing::info!(dir = %markdown_dir.display(), files = files.len(), "parsing markdown");

    let mut examples = Vec::with_capacity(files.len());
    for path in files {
        match policy.run(&path.display().to_string(), |_| read_example(&path, style)) {
            Ok(parsed) => examples.push(parsed),
            Err(err) if err.is_retryable() => report.fail(path, &err),
            Err(err) => report.skip(&path, err.to_string()),
        }
    }
    Ok(examples)
}

#[must_use]
/// Group examples into sections ordered by chapter rank, examples ordered by example rank.
///
/// Both orders compare the zero-padded prefixes as strings. A chapter id seen under two prefixes
/// keeps the first one encountered. Tags and file paths are dropped.
pub fn group_sections(examples: Vec<ParsedExample>) -> Vec<SectionPayload> {
    let mut chapters: Vec<(String, String, Vec<ParsedExample>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for parsed in examples {
        let slot = *index.entry(parsed.chapter_id.clone()).or_insert_with(|| {
            chapters.push((
                parsed.chapter_id.clone(),
                parsed.chapter_prefix.clone(),
                Vec::new(),
            ));
            chapters.len() - 1
        });
        chapters[slot].2.push(parsed);
    }

    chapters.sort_by(|a, b| a.1.cmp(&b.1));

    chapters
        .into_iter()
        .map(|(id, order_prefix, mut examples)| {
            examples.sort_by(|a, b| a.example_prefix.cmp(&b.example_prefix));
            SectionPayload {
                section: Section {
                    title: title_from_id(&id),
                    code_examples: examples.into_iter().map(|parsed| parsed.example).collect(),
                },
                id,
                order_prefix,
            }
        })
        .collect()
}

/// Rebuild section JSON and the rich manifest from the Markdown layout.
///
/// # Errors
///
/// Returns [`Error::Io`] if `markdown_dir` cannot be walked and [`Error::FatalDir`] if the
/// output directories cannot be created.
pub fn markdown_to_json(
    markdown_dir: &Path,
    layout: &SiteLayout,
    style: &DocumentStyle,
    policy: &RetryPolicy,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    let examples = collect_examples(markdown_dir, style, policy, &mut report)?;
    let sections = group_sections(examples);
    tracing::info!(sections = sections.len(), "grouped examples");
    report.merge(write_site(&sections, layout, policy)?);
    Ok(report)
}

#[cfg(test)]
#[path = "tests/convert.rs"]
mod tests;
