//! Error type shared by the conversion pipeline and the data-access layer.
//!
//! Parse failures are reported per record and never abort a batch on their own; I/O failures are
//! retried by the batch jobs; only a failure to create an output root is fatal for a whole run.

use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
/// Everything that can go wrong while reading, converting or serving section data.
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory the operation touched.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// A JSON document could not be parsed or serialised.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// File the document came from or was destined for.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The header block of a Markdown example has no usable `title:` line.
    #[error("missing or empty title")]
    MissingTitle,

    /// The Markdown example contains no code block in the source language.
    #[error("no {language} code block found")]
    MissingCode {
        /// Fence language that was searched for.
        language: String,
    },

    /// The `tags:` list does not follow the bracketed comma-list grammar.
    #[error("malformed tag list {input:?}: {reason}")]
    MalformedTags {
        /// Raw text after `tags:`.
        input: String,
        /// What the parser tripped over.
        reason: String,
    },

    /// A path does not follow the `NNN_<chapter>/NNN_<slug>.md` layout.
    #[error("unrecognised layout for {}", path.display())]
    Layout {
        /// Offending path.
        path: PathBuf,
    },

    /// The source document could not be parsed into a syntax tree.
    #[error("failed to parse markdown: {0}")]
    Syntax(String),

    /// An output root directory could not be created; the run cannot continue.
    #[error("cannot create output directory {}: {source}", path.display())]
    FatalDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be read or deserialised.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No manifest entry exists for the requested section id.
    #[error("unknown section {0:?}")]
    UnknownSection(String),

    /// A previous attempt to load the section failed and has not been invalidated.
    #[error("section {id:?} failed to load: {reason}")]
    SectionUnavailable {
        /// Section id.
        id: String,
        /// Message recorded when the load failed.
        reason: String,
    },
}

impl Error {
    #[must_use]
    /// Wrap an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    /// Wrap a serde error together with the path it concerns.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    /// Whether repeating the operation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
