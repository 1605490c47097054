//! Migration of legacy YAML front matter to the labelled header block.
//!
//! Older example files start with
//!
//! ```text
//! ---
//! title: Hello World
//! tags: [basics]
//! ---
//! ```
//!
//! which is replaced in place by the header that [`render_header`] produces. Only `title:`,
//! `tags:` and blank lines are recognised inside the block; anything else means the file is not
//! in the legacy shape and it is left alone.

use crate::error::{Error, Result};
use crate::header::{parse_tag_list, render_header, Labels};
use crate::input;
use crate::report::{BatchReport, FileOutcome};
use crate::retry::RetryPolicy;
use crate::rewrite::run_batch;
use std::fs;
use std::path::Path;

const DELIMITER: &str = "---";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Values found in a YAML front-matter block.
pub struct FrontMatter {
    /// Cleaned `title:` value, `None` when absent or empty.
    pub title: Option<String>,
    /// Raw `tags:` value.
    pub tags: Option<String>,
}

#[must_use]
/// Split a leading front-matter block from the body that follows it.
///
/// Returns `None` when `content` does not open with a well-formed block.
pub fn split_front_matter(content: &str) -> Option<(FrontMatter, &str)> {
    let mut lines = content.split_inclusive('\n');
    let mut consumed = 0;

    let opening = lines.next()?;
    if opening.trim() != DELIMITER {
        return None;
    }
    consumed += opening.len();

    let mut front = FrontMatter::default();
    for line in lines {
        consumed += line.len();
        let trimmed = line.trim();
        if trimmed == DELIMITER {
            return Some((front, &content[consumed..]));
        }
        if trimmed.is_empty() {
            continue;
        }
        if let Some(value) = trimmed.strip_prefix("title:") {
            front.title = Some(clean_title(value)).filter(|title| !title.is_empty());
        } else if let Some(value) = trimmed.strip_prefix("tags:") {
            front.tags = Some(value.trim().to_string());
        } else {
            return None;
        }
    }
    None
}

/// Strip a trailing `# comment` and one pair of surrounding quotes from a title value.
fn clean_title(value: &str) -> String {
    let value = value.trim();
    if let Some(title) = double_quoted(value).or_else(|| single_quoted(value)) {
        return title.trim().to_string();
    }
    let value = value
        .find(" #")
        .or_else(|| value.find("\t#"))
        .map_or(value, |at| &value[..at]);
    value.trim().to_string()
}

/// Contents of a leading `"..."` scalar with `\"` and `\\` unescaped.
fn double_quoted(value: &str) -> Option<String> {
    let mut chars = value.strip_prefix('"')?.chars();
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(out),
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    None
}

/// Contents of a leading `'...'` scalar, where `''` stands for one quote.
fn single_quoted(value: &str) -> Option<String> {
    let mut chars = value.strip_prefix('\'')?.chars().peekable();
    let mut out = String::new();
    while let Some(c) = chars.next() {
        if c == '\'' && chars.next_if_eq(&'\'').is_none() {
            return Some(out);
        }
        out.push(c);
    }
    None
}

/// Rewrite `content` with its front matter replaced by the labelled header.
///
/// Returns `Ok(None)` when there is no front matter to migrate.
///
/// # Errors
///
/// Returns [`Error::MissingTitle`] when the block has no title and [`Error::MalformedTags`]
/// when its tag list cannot be parsed.
pub fn migrate_content(content: &str, labels: &Labels) -> Result<Option<String>> {
    let Some((front, body)) = split_front_matter(content) else {
        return Ok(None);
    };
    let title = front.title.ok_or(Error::MissingTitle)?;
    let tags = parse_tag_list(front.tags.as_deref().unwrap_or("[]"))?;
    let migrated = format!("{}{body}", render_header(&title, &tags, labels));
    Ok((migrated != content).then_some(migrated))
}

/// Migrate one Markdown file in place.
///
/// # Errors
///
/// Returns [`Error::Io`] on read/write failure and the errors of [`migrate_content`].
pub fn migrate_file(path: &Path, labels: &Labels) -> Result<FileOutcome> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    match migrate_content(&content, labels)? {
        Some(migrated) => {
            fs::write(path, migrated).map_err(|e| Error::io(path, e))?;
            Ok(FileOutcome::Written)
        }
        None => Ok(FileOutcome::Unchanged),
    }
}

/// Migrate every Markdown file below `dir`.
///
/// # Errors
///
/// Returns [`Error::Io`] only if the directory tree cannot be walked.
pub fn migrate_dir(dir: &Path, labels: &Labels, policy: &RetryPolicy) -> Result<BatchReport> {
    let files = input::find_documents(dir, "md")?;
    tracing::info!(dir = %dir.display(), files = files.len(), "migrating front matter");
    Ok(run_batch(files, policy, |path| migrate_file(path, labels)))
}

#[cfg(test)]
#[path = "tests/frontmatter.rs"]
mod tests;
