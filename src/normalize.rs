//! Folding comment-only blocks into the descriptions of the examples they follow.

use crate::comments::CommentSyntax;
use crate::section::{CodeExample, Section};

/// Normalize an authored sequence of blocks into examples.
///
/// A comment-only block becomes the description of the nearest preceding example and produces
/// no record of its own. A comment-only block with no example before it is dropped. Running this
/// on already-normalized examples returns them unchanged.
#[must_use]
pub fn normalize_examples(blocks: Vec<CodeExample>, syntax: &CommentSyntax) -> Vec<CodeExample> {
    let mut examples: Vec<CodeExample> = Vec::with_capacity(blocks.len());

    for block in blocks {
        if syntax.is_comment_only(&block.code) {
            match examples.last_mut() {
                Some(current) => {
                    let text = syntax.format_comment_block(&block.code);
                    current.description = (!text.is_empty()).then_some(text);
                }
                None => {
                    tracing::debug!(title = %block.title, "dropping leading comment-only block");
                }
            }
        } else {
            examples.push(block);
        }
    }

    examples
}

#[must_use]
/// Normalize every block of a section, keeping its title.
pub fn normalize_section(section: Section, syntax: &CommentSyntax) -> Section {
    Section {
        title: section.title,
        code_examples: normalize_examples(section.code_examples, syntax),
    }
}

#[cfg(test)]
#[path = "tests/normalize.rs"]
mod tests;
