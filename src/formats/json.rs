//! Section JSON on disk: authored sources, served payloads and manifests.
//!
//! Output is pretty-printed with two-space indentation and a trailing newline so regenerated
//! files diff cleanly against hand-edited ones.

use crate::error::{Error, Result};
use crate::section::{ManifestEntry, Section};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a section file, returning `None` for a blank file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`] if it is not a section.
pub fn read_section(path: &Path) -> Result<Option<Section>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_json(&text, path).map(Some)
}

/// Read a manifest, accepting both the compact and the rich row shapes.
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Json`] on failure.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_json(&text, path)
}

/// Deserialize `text`, attributing failures to `path`.
///
/// # Errors
///
/// Returns [`Error::Json`] if `text` does not match `T`.
pub fn parse_json<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::json(path, e))
}

/// Write `value` as pretty JSON to `path`.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialisation fails and [`Error::Io`] if the write fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    fs::write(path, json + "\n").map_err(|e| Error::io(path, e))
}
