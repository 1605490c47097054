//! The two-field header block at the top of every Markdown example.
//!
//! ```text
//! ## Title
//! title: Hello World
//! ## Tags
//! tags: ["basics", extra]
//! ```
//!
//! The tag list follows a small grammar:
//!
//! ```text
//! list  := ws '[' item (',' item)* ']' ws
//! item  := ws (quoted | bare)? ws
//! quoted:= '"' [^"]* '"' | '\'' [^']* '\''
//! bare  := [^,\[\]"']+            (trimmed)
//! ```
//!
//! Empty items are dropped, so `[]`, `[a,]` and `[a,,b]` are all accepted; nested brackets and
//! unbalanced quotes are rejected.

use crate::error::{Error, Result};
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::separated_list0,
    sequence::{delimited, pair, terminated},
    IResult,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Section labels of the Markdown authoring format.
pub struct Labels {
    /// Heading above the `title:` line.
    pub title: String,
    /// Heading above the `tags:` line.
    pub tags: String,
    /// Heading above the fenced description.
    pub description: String,
    /// Heading above the fenced code.
    pub code: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            tags: "Tags".to_string(),
            description: "Description".to_string(),
            code: "Code".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Raw header values; `None` when the labelled line is absent or empty.
pub struct Header {
    /// Trimmed text after `title:`.
    pub title: Option<String>,
    /// Untouched text after `tags:`, still to be run through [`parse_tag_list`].
    pub tags: Option<String>,
}

#[must_use]
/// Render the header block, ending with a newline.
///
/// Tags containing both quote characters cannot be written in the tag grammar and are left out.
pub fn render_header(title: &str, tags: &[String], labels: &Labels) -> String {
    let title = title.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    let tags = tags
        .iter()
        .filter(|tag| {
            let quotable = !(tag.contains('"') && tag.contains('\''));
            if !quotable {
                tracing::warn!(%tag, "dropping tag that mixes quote characters");
            }
            quotable
        })
        .map(|tag| {
            if tag.contains('"') {
                format!("'{tag}'")
            } else {
                format!("\"{tag}\"")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "## {}\ntitle: {title}\n## {}\ntags: [{tags}]\n",
        labels.title, labels.tags
    )
}

#[must_use]
/// Find the labelled `title:` and `tags:` lines anywhere in `content`.
pub fn parse_header(content: &str, labels: &Labels) -> Header {
    Header {
        title: labelled_value(content, &labels.title, "title:")
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(ToString::to_string),
        tags: labelled_value(content, &labels.tags, "tags:").map(|tags| tags.trim().to_string()),
    }
}

/// Value of the first `key` line that follows a `## label` heading, skipping blank lines.
fn labelled_value<'a>(content: &'a str, label: &str, key: &str) -> Option<&'a str> {
    let mut lines = content.lines();
    while let Some(line) = lines.next() {
        if !is_label_heading(line, label) {
            continue;
        }
        let next = lines.by_ref().find(|line| !line.trim().is_empty())?;
        if let Some(value) = next.trim_start().strip_prefix(key) {
            return Some(value);
        }
    }
    None
}

#[must_use]
/// True for a level-two heading whose text is exactly `label`.
pub fn is_label_heading(line: &str, label: &str) -> bool {
    line.trim()
        .strip_prefix("##")
        .is_some_and(|rest| !rest.starts_with('#') && rest.trim() == label)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    map(
        take_till1(|c: char| matches!(c, ',' | '[' | ']' | '"' | '\'')),
        str::trim,
    )(input)
}

fn item(input: &str) -> IResult<&str, Option<&str>> {
    delimited(multispace0, opt(alt((quoted, bare))), multispace0)(input)
}

fn tag_list(input: &str) -> IResult<&str, Vec<Option<&str>>> {
    all_consuming(delimited(
        pair(multispace0, char('[')),
        terminated(separated_list0(char(','), item), opt(char(','))),
        pair(char(']'), multispace0),
    ))(input)
}

/// Parse a bracketed, comma-separated tag list.
///
/// # Errors
///
/// Returns [`Error::MalformedTags`] when the input does not match the grammar.
pub fn parse_tag_list(input: &str) -> Result<Vec<String>> {
    let (_, items) = tag_list(input).map_err(|err| Error::MalformedTags {
        input: input.to_string(),
        reason: err.to_string(),
    })?;
    Ok(items
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
#[path = "tests/header.rs"]
mod tests;
