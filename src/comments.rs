//! Line-comment detection and trailing-comment hoisting.
//!
//! Authored blocks that consist only of comments become descriptions of the example before
//! them, so the predicate here decides which blocks survive as examples. The hoisting transform
//! moves a comment that trails code on the same line onto its own line directly above.

#[derive(Clone, Debug, PartialEq, Eq)]
/// Line-comment syntax of the cheatsheet's source language.
pub struct CommentSyntax {
    marker: String,
}

impl Default for CommentSyntax {
    fn default() -> Self {
        Self::new("//")
    }
}

/// Literal the scanner is currently inside, carried across lines so raw strings can span them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Literal {
    None,
    Double,
    Single,
    Raw,
}

impl CommentSyntax {
    #[must_use]
    /// Syntax whose line comments start with `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    #[must_use]
    /// The line-comment marker, e.g. `//`.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    #[must_use]
    /// True when the line, ignoring leading whitespace, starts with the comment marker.
    pub fn is_comment_line(&self, line: &str) -> bool {
        line.trim_start().starts_with(&self.marker)
    }

    #[must_use]
    /// True when every non-blank line of `block` is a comment line.
    ///
    /// An empty or all-whitespace block counts as comment-only.
    pub fn is_comment_only(&self, block: &str) -> bool {
        block
            .lines()
            .all(|line| line.trim().is_empty() || self.is_comment_line(line))
    }

    #[must_use]
    /// Turn a comment-only block into description prose.
    ///
    /// Each line loses its marker and the whitespace after it; blank lines are dropped.
    pub fn format_comment_block(&self, block: &str) -> String {
        block
            .lines()
            .map(|line| {
                let line = line.trim();
                line.strip_prefix(self.marker.as_str())
                    .map_or(line, str::trim_start)
            })
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    /// Split a line of code carrying a trailing comment into `(code, comment)`.
    ///
    /// The code part is right-trimmed and the comment part keeps its marker. Full comment lines,
    /// blank lines and lines without a trailing comment yield `None`. Markers inside string
    /// and rune literals are not comments.
    pub fn split_trailing_comment(&self, line: &str) -> Option<(String, String)> {
        let mut state = Literal::None;
        self.split_with_state(line, &mut state)
    }

    #[must_use]
    /// Rewrite `code` so every trailing comment sits on its own line above the code it annotates.
    ///
    /// Returns `None` when no line changed.
    pub fn hoist_trailing_comments(&self, code: &str) -> Option<String> {
        let mut state = Literal::None;
        let mut changed = false;
        let mut out = Vec::new();

        for line in code.split('\n') {
            if let Some((code_part, comment_part)) = self.split_with_state(line, &mut state) {
                out.push(comment_part);
                out.push(code_part);
                changed = true;
            } else {
                out.push(line.to_string());
            }
        }

        changed.then(|| out.join("\n"))
    }

    fn split_with_state(&self, line: &str, state: &mut Literal) -> Option<(String, String)> {
        if *state == Literal::None && self.is_comment_line(line) {
            return None;
        }

        let at = self.find_marker(line, state)?;
        let code_part = line[..at].trim_end();
        if code_part.trim().is_empty() {
            return None;
        }
        Some((code_part.to_string(), line[at..].trim().to_string()))
    }

    /// Byte offset of the first marker outside any literal, advancing `state` past the line.
    fn find_marker(&self, line: &str, state: &mut Literal) -> Option<usize> {
        let mut chars = line.char_indices();

        while let Some((i, c)) = chars.next() {
            match *state {
                Literal::None => {
                    if line[i..].starts_with(&self.marker) {
                        return Some(i);
                    }
                    *state = match c {
                        '"' => Literal::Double,
                        '\'' => Literal::Single,
                        '`' => Literal::Raw,
                        _ => Literal::None,
                    };
                }
                Literal::Double | Literal::Single => {
                    let close = if *state == Literal::Double { '"' } else { '\'' };
                    if c == '\\' {
                        chars.next();
                    } else if c == close {
                        *state = Literal::None;
                    }
                }
                Literal::Raw => {
                    if c == '`' {
                        *state = Literal::None;
                    }
                }
            }
        }

        // Interpreted strings and runes cannot continue onto the next line.
        if matches!(*state, Literal::Double | Literal::Single) {
            *state = Literal::None;
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/comments.rs"]
mod tests;
