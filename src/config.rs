//! Configuration to acknowledge project layout as well as set defaults.
//!
//! Specifically, we try to find a sheetsmith.toml, and if present we load settings from there.
//! Every field has a default, so a missing file or an empty one yields the stock Go cheatsheet
//! layout.

use crate::comments::CommentSyntax;
use crate::document::DocumentStyle;
use crate::error::{Error, Result};
use crate::header::Labels;
use crate::manifest::{ManifestStyle, SiteLayout};
use crate::retry::RetryPolicy;
use facet::Facet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sheetsmith.toml";

#[derive(Facet, Clone, Debug)]
/// Project settings loaded from sheetsmith.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "//".to_string())]
    /// Line-comment marker of the cheatsheet's language.
    pub comment_marker: String,
    #[facet(default = "go".to_string())]
    /// Fence language of example code.
    pub code_language: String,
    #[facet(default = "text".to_string())]
    /// Fence language of example descriptions.
    pub description_language: String,
    #[facet(default = "Title".to_string())]
    /// Heading above the `title:` line.
    pub title_label: String,
    #[facet(default = "Tags".to_string())]
    /// Heading above the `tags:` line.
    pub tags_label: String,
    #[facet(default = "Description".to_string())]
    /// Heading above the description fence.
    pub description_label: String,
    #[facet(default = "Code".to_string())]
    /// Heading above the code fence.
    pub code_label: String,
    #[facet(default = "src/data/cheatsheet".to_string())]
    /// Directory of raw section JSON, one `<id>.json` per section.
    pub json_dir: String,
    #[facet(default = "src/data/cheatsheet-md".to_string())]
    /// Root of the Markdown authoring layout.
    pub markdown_dir: String,
    #[facet(default = "public/data".to_string())]
    /// Directory the served section data is written to.
    pub output_dir: String,
    #[facet(default = "/data".to_string())]
    /// URL prefix under which `output_dir` is published.
    pub fetch_prefix: String,
    #[facet(default = "sections-manifest.json".to_string())]
    /// Compact manifest file name inside `output_dir`.
    pub manifest_file: String,
    #[facet(default = "index.json".to_string())]
    /// Rich index file name inside `json_dir`.
    pub index_file: String,
    #[facet(default = default_section_order())]
    /// Section ids in display order.
    pub section_order: Vec<String>,
    #[facet(default = 3)]
    /// Attempts per file before it is recorded as failed.
    pub max_attempts: u32,
    #[facet(default = 1000)]
    /// Delay before the first retry; doubled for each further one.
    pub initial_retry_delay_ms: u64,
}

fn default_section_order() -> Vec<String> {
    [
        "basics",
        "basic-types",
        "flow-control",
        "functions",
        "data-structures",
        "methods",
        "interfaces",
        "packages",
        "error-handling",
        "concurrency",
        "context",
        "io-operations",
        "generics",
        "references",
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect()
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid TOML for this schema.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read and [`Error::Config`] if it
    /// cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::from_toml("")
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    #[must_use]
    /// Comment syntax built from `comment_marker`.
    pub fn comment_syntax(&self) -> CommentSyntax {
        CommentSyntax::new(self.comment_marker.as_str())
    }

    #[must_use]
    /// Labels and fence languages of the Markdown authoring format.
    pub fn document_style(&self) -> DocumentStyle {
        DocumentStyle {
            labels: Labels {
                title: self.title_label.clone(),
                tags: self.tags_label.clone(),
                description: self.description_label.clone(),
                code: self.code_label.clone(),
            },
            code_language: self.code_language.clone(),
            description_language: self.description_language.clone(),
        }
    }

    #[must_use]
    /// Retry policy for filesystem work.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            initial_delay: Duration::from_millis(self.initial_retry_delay_ms),
        }
    }

    #[must_use]
    /// Where `bundle` serves sections and the compact manifest.
    pub fn served_layout(&self) -> SiteLayout {
        SiteLayout {
            output_dir: PathBuf::from(&self.output_dir),
            manifest_file: self.manifest_file.clone(),
            fetch_prefix: self.fetch_prefix.clone(),
            style: ManifestStyle::Compact,
        }
    }

    #[must_use]
    /// Where `md-to-json` writes sections and the rich index.
    pub fn index_layout(&self) -> SiteLayout {
        SiteLayout {
            output_dir: PathBuf::from(&self.json_dir),
            manifest_file: self.index_file.clone(),
            fetch_prefix: self.fetch_prefix.clone(),
            style: ManifestStyle::Rich,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
