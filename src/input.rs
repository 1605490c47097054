//! Discovery of source files for the batch jobs.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(extension)
}

/// Entries directly inside `dir` whose name ends in `.extension`, sorted by name.
///
/// Matching is by name only, so a directory called `x.json` is listed too and will fail when
/// read.
///
/// # Errors
///
/// Returns [`Error::Io`] if `dir` cannot be listed.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if has_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Regular files anywhere below `root` with the given extension, in file-name order per directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if `root` or one of its subdirectories cannot be read.
pub fn find_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}
