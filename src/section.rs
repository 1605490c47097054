//! Record model for cheatsheet sections.
//!
//! A section is a titled, ordered group of code examples. Order is pedagogical: it comes from
//! array position in the JSON sources or from the zero-padded rank prefixes in the Markdown
//! layout, never from sorting titles. Records are produced once by the offline conversion and
//! are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// One titled snippet with an optional prose description.
pub struct CodeExample {
    /// Human-readable heading shown on the card.
    pub title: String,
    /// Source-language text. Never comment-only once normalized.
    pub code: String,
    /// Explanation folded in from a following comment-only block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CodeExample {
    #[must_use]
    /// Example without a description.
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            description: None,
        }
    }

    #[must_use]
    /// Attach a description, treating empty text as none.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Payload of one cheatsheet chapter, as authored and as served.
pub struct Section {
    /// Chapter heading.
    pub title: String,
    /// Examples in display order.
    pub code_examples: Vec<CodeExample>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// One row of the manifest that lets a client list sections before fetching any of them.
///
/// The compact manifest carries only `id` and `title`; the rich index also records the rank
/// prefix and the fetch path.
pub struct ManifestEntry {
    /// Stable slug, unique across the manifest.
    pub id: String,
    /// Display title of the section.
    pub title: String,
    /// Zero-padded rank; sorts lexicographically in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_prefix: Option<String>,
    /// Fetch-relative locator of the section payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Clone, Debug)]
/// An example recovered from a Markdown file, with the bookkeeping needed to group and sort it.
///
/// The extra fields are internal to the conversion and are stripped before serving.
pub struct ParsedExample {
    /// The example itself.
    pub example: CodeExample,
    /// Chapter id followed by explicit tags, deduplicated.
    pub tags: Vec<String>,
    /// Chapter id taken from the parent directory name.
    pub chapter_id: String,
    /// Rank prefix of the chapter directory.
    pub chapter_prefix: String,
    /// Rank prefix of the example file.
    pub example_prefix: String,
    /// File the example was read from.
    pub file_path: PathBuf,
}
