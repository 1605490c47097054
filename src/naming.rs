//! File and directory naming for the Markdown layout.
//!
//! Chapters live in `NNN_<chapter-id>/` directories and examples in `NNN_<slug>.md` files, where
//! `NNN` is a zero-padded rank that grows by ten per item so entries can be slotted in by hand.

use crate::error::{Error, Result};
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, rest, verify},
    sequence::separated_pair,
    IResult,
};
use std::path::Path;

/// Gap between consecutive ranks.
pub const RANK_STEP: usize = 10;

/// Slug used when a title has no characters that survive slugification.
const FALLBACK_SLUG: &str = "example";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Ordering information recovered from an example's path.
pub struct PathInfo {
    /// Rank prefix of the chapter directory.
    pub chapter_prefix: String,
    /// Chapter id, which doubles as the section id.
    pub chapter_id: String,
    /// Rank prefix of the example file.
    pub example_prefix: String,
    /// Slug part of the file name.
    pub example_slug: String,
}

#[must_use]
/// Lowercase, hyphenate whitespace runs and drop everything outside `[A-Za-z0-9_-]`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[must_use]
/// Zero-padded rank for the item at `index` (0 → `000`, 1 → `010`).
pub fn order_prefix(index: usize) -> String {
    format!("{:03}", index * RANK_STEP)
}

#[must_use]
/// Directory name for the chapter at `index`.
pub fn chapter_dir_name(index: usize, chapter_id: &str) -> String {
    format!("{}_{chapter_id}", order_prefix(index))
}

#[must_use]
/// File name for the example at `index` within its chapter.
pub fn example_file_name(index: usize, title: &str) -> String {
    let slug = slugify(title);
    let slug = if slug.is_empty() {
        FALLBACK_SLUG
    } else {
        &slug
    };
    format!("{}_{slug}.md", order_prefix(index))
}

#[must_use]
/// Display title derived from a chapter id: `basic-types` becomes `Basic Types`.
pub fn title_from_id(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn rank_prefixed(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
        char('_'),
        verify(rest, |s: &str| !s.is_empty()),
    ))(input)
}

/// Split a `NNN_<name>` component into its rank prefix and name.
#[must_use]
pub fn split_rank_prefix(component: &str) -> Option<(&str, &str)> {
    rank_prefixed(component).ok().map(|(_, parts)| parts)
}

/// Recover chapter and example ordering from `.../NNN_<chapter>/NNN_<slug>.md`.
///
/// # Errors
///
/// Returns [`Error::Layout`] when the file is not a `.md` file or either component lacks a
/// three-digit rank prefix.
pub fn parse_example_path(path: &Path) -> Result<PathInfo> {
    let layout_error = || Error::Layout {
        path: path.to_path_buf(),
    };

    if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
        return Err(layout_error());
    }
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(layout_error)?;
    let chapter = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .ok_or_else(layout_error)?;

    let (example_prefix, example_slug) = split_rank_prefix(stem).ok_or_else(layout_error)?;
    let (chapter_prefix, chapter_id) = split_rank_prefix(chapter).ok_or_else(layout_error)?;

    Ok(PathInfo {
        chapter_prefix: chapter_prefix.to_string(),
        chapter_id: chapter_id.to_string(),
        example_prefix: example_prefix.to_string(),
        example_slug: example_slug.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/naming.rs"]
mod tests;
