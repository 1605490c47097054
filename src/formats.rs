//! Format trait and implementations for the on-disk representations of section data.
//!
//! Markdown example files are parsed with tree-sitter; the `Format` trait supplies the grammar and
//! the query that locates fenced code blocks, so the extraction code does not hard-code either.
//! Section JSON is plain serde and lives in [`json`].

pub mod json;
pub mod markdown;

/// A document grammar plus the query that finds its fenced code blocks.
pub trait Format {
    /// Tree-sitter grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose captures are the fenced code block nodes.
    fn fence_query(&self) -> &str;
}
