//! One example as a Markdown file: header block, optional description, fenced code.
//!
//! ````text
//! ## Title
//! title: Hello World
//! ## Tags
//! tags: ["basics"]
//!
//! ## Description
//!
//! ```text
//! Prints a greeting.
//! ```
//!
//! ## Code
//!
//! ```go
//! fmt.Println("hello")
//! ```
//! ````

use crate::error::{Error, Result};
use crate::formats::markdown::{extract_fences, Fence, MarkdownFormat};
use crate::header::{parse_header, parse_tag_list, render_header, Labels};
use crate::section::CodeExample;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Labels and fence languages used when reading and writing example files.
pub struct DocumentStyle {
    /// Section labels of the header and body.
    pub labels: Labels,
    /// Fence language of the code block, e.g. `go`.
    pub code_language: String,
    /// Fence language of the description block.
    pub description_language: String,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            code_language: "go".to_string(),
            description_language: "text".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a Markdown example file contains.
pub struct ExampleDocument {
    /// The example.
    pub example: CodeExample,
    /// Explicit tags from the header; `None` when absent or malformed.
    pub tags: Option<Vec<String>>,
}

#[must_use]
/// Render an example file.
pub fn render_document(example: &CodeExample, tags: &[String], style: &DocumentStyle) -> String {
    let mut out = render_header(&example.title, tags, &style.labels);

    if let Some(description) = example
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
    {
        out.push_str(&format!("\n## {}\n\n", style.labels.description));
        out.push_str(&fenced(&style.description_language, description));
    }

    out.push_str(&format!("\n## {}\n\n", style.labels.code));
    out.push_str(&fenced(&style.code_language, &example.code));
    out
}

/// Fence `content`, lengthening the fence past any backtick run inside it.
fn fenced(language: &str, content: &str) -> String {
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{language}\n{}\n{fence}\n", content.trim_end())
}

/// Parse an example file.
///
/// The code is the block fenced in the code language under the code label; if no block is
/// labelled, the first block in the code language outside the description section is used.
///
/// # Errors
///
/// Returns [`Error::MissingTitle`] when the header has no title, [`Error::MissingCode`] when no
/// non-empty code block exists, and [`Error::Syntax`] if the document cannot be parsed.
pub fn parse_document(content: &str, style: &DocumentStyle) -> Result<ExampleDocument> {
    let header = parse_header(content, &style.labels);
    let title = header.title.ok_or(Error::MissingTitle)?;

    let fences = extract_fences(content, &MarkdownFormat)?;
    let labels = &style.labels;

    let code = find_fence(&fences, &labels.code, &style.code_language)
        .or_else(|| {
            fences.iter().find(|fence| {
                fence.language.as_deref() == Some(style.code_language.as_str())
                    && fence.heading.as_deref() != Some(labels.description.as_str())
            })
        })
        .map(|fence| clean_block(&fence.content))
        .filter(|code| !code.is_empty())
        .ok_or_else(|| Error::MissingCode {
            language: style.code_language.clone(),
        })?;

    let description = find_fence(&fences, &labels.description, &style.description_language)
        .map_or_else(String::new, |fence| fence.content.trim().to_string());

    let tags = header.tags.and_then(|raw| {
        parse_tag_list(&raw)
            .inspect_err(|err| tracing::warn!(%err, "ignoring tags"))
            .ok()
    });

    Ok(ExampleDocument {
        example: CodeExample::new(title, code).with_description(description),
        tags,
    })
}

fn find_fence<'a>(fences: &'a [Fence], heading: &str, language: &str) -> Option<&'a Fence> {
    fences.iter().find(|fence| {
        fence.heading.as_deref() == Some(heading) && fence.language.as_deref() == Some(language)
    })
}

/// Drop blank lines around a block while keeping the first line's indentation.
fn clean_block(content: &str) -> String {
    content
        .trim_end()
        .trim_start_matches(['\n', '\r'])
        .to_string()
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
