//! Markdown format implementation using tree-sitter-md.
//!
//! This module locates fenced code blocks together with the heading of the section that contains
//! them, which is how labelled `## Code` and `## Description` blocks are told apart.

use crate::error::{Error, Result};
use crate::formats::Format;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Markdown documents parsed with the tree-sitter block grammar.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn fence_query(&self) -> &'static str {
        "(fenced_code_block) @fence"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A fenced code block and where it sits in the document.
pub struct Fence {
    /// Text of the nearest enclosing heading, without markers.
    pub heading: Option<String>,
    /// First word of the info string, e.g. `go` or `text`.
    pub language: Option<String>,
    /// Raw block content, including its final newline.
    pub content: String,
}

/// Collect every fenced code block in `source`, in document order.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the grammar or query cannot be loaded or parsing yields no tree.
pub fn extract_fences(source: &str, format: &impl Format) -> Result<Vec<Fence>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Syntax(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Syntax("parser produced no tree".to_string()))?;
    let query =
        Query::new(&language, format.fence_query()).map_err(|e| Error::Syntax(e.to_string()))?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    let mut fences = Vec::new();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            fences.push(fence_from_node(capture.node, source));
        }
    }

    Ok(fences)
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

fn fence_from_node(node: Node<'_>, source: &str) -> Fence {
    let mut language = None;
    let mut content = String::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "info_string" => {
                language = node_text(child, source)
                    .split_whitespace()
                    .next()
                    .map(ToString::to_string);
            }
            "code_fence_content" => content = node_text(child, source).to_string(),
            _ => {}
        }
    }

    Fence {
        heading: enclosing_heading(node, source),
        language,
        content,
    }
}

/// Heading text of the innermost section containing `node`.
fn enclosing_heading(node: Node<'_>, source: &str) -> Option<String> {
    let mut parent = node.parent();
    while let Some(candidate) = parent {
        if candidate.kind() == "section" {
            let mut cursor = candidate.walk();
            let heading = candidate
                .named_children(&mut cursor)
                .find(|child| child.kind().ends_with("_heading"))?;
            let text = node_text(heading, source);
            let first_line = text.lines().next().unwrap_or_default();
            return Some(first_line.trim().trim_start_matches('#').trim().to_string());
        }
        parent = candidate.parent();
    }
    None
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
