//! Read-side access to built section data.
//!
//! A reader first needs the manifest to list sections, and only later, section by section, the
//! payloads themselves. The store holds the manifest eagerly and every payload lazily: a payload
//! is loaded on first request and then served from memory until it is explicitly invalidated.
//! Where the bytes come from is behind [`SectionSource`], so the same store serves a built
//! output directory or an in-memory fixture.

use crate::error::{Error, Result};
use crate::formats::json::{parse_json, read_manifest};
use crate::manifest::{SiteLayout, SECTIONS_DIR};
use crate::section::{ManifestEntry, Section};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Where manifests and section payloads are loaded from.
pub trait SectionSource {
    /// Load the ordered manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or parsed.
    fn load_manifest(&self) -> Result<Vec<ManifestEntry>>;

    /// Load the payload one manifest entry points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be read or parsed.
    fn load_section(&self, entry: &ManifestEntry) -> Result<Section>;
}

#[derive(Clone, Debug)]
/// Section data in a built output directory.
pub struct FsSource {
    root: PathBuf,
    manifest_file: String,
    fetch_prefix: String,
}

impl FsSource {
    #[must_use]
    /// Source rooted at `root`, whose payload paths are published under `fetch_prefix`.
    pub fn new(
        root: impl Into<PathBuf>,
        manifest_file: impl Into<String>,
        fetch_prefix: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            manifest_file: manifest_file.into(),
            fetch_prefix: fetch_prefix.into(),
        }
    }

    #[must_use]
    /// Source reading what [`crate::manifest::write_site`] wrote for `layout`.
    pub fn from_layout(layout: &SiteLayout) -> Self {
        Self::new(
            &layout.output_dir,
            &layout.manifest_file,
            &layout.fetch_prefix,
        )
    }

    #[must_use]
    /// File backing `entry`.
    ///
    /// A `filePath` under the fetch prefix maps onto the root; entries without one, or with a
    /// path that leaves the root, fall back to `sections/<id>.json`.
    pub fn locate(&self, entry: &ManifestEntry) -> PathBuf {
        let prefix = self.fetch_prefix.trim_end_matches('/');
        entry
            .file_path
            .as_deref()
            .and_then(|path| path.strip_prefix(prefix))
            .map(|rest| Path::new(rest.trim_start_matches('/')))
            .filter(|rest| {
                !rest.as_os_str().is_empty()
                    && rest
                        .components()
                        .all(|component| matches!(component, Component::Normal(_)))
            })
            .map_or_else(
                || {
                    self.root
                        .join(SECTIONS_DIR)
                        .join(format!("{}.json", entry.id))
                },
                |rest| self.root.join(rest),
            )
    }
}

impl SectionSource for FsSource {
    fn load_manifest(&self) -> Result<Vec<ManifestEntry>> {
        read_manifest(&self.root.join(&self.manifest_file))
    }

    fn load_section(&self, entry: &ManifestEntry) -> Result<Section> {
        let path = self.locate(entry);
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        parse_json(&text, &path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Load lifecycle of one section payload.
///
/// ```text
/// Idle -> Loading -> Loaded
///                 \-> Errored
///   ^                  |
///   |__________________|
///      (invalidate / clear)
/// ```
///
/// `Loaded` and `Errored` are terminal: further requests are answered from the recorded state
/// without touching the source. Only [`SectionStore::invalidate`] or [`SectionStore::clear`]
/// return a section to `Idle`.
pub enum LoadState {
    /// Never requested, or invalidated since.
    Idle,
    /// A load is in progress.
    Loading,
    /// The payload is cached.
    Loaded(Arc<Section>),
    /// The load failed with the recorded message.
    Errored(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A section matching a search keyword.
pub struct SearchHit {
    /// Section id.
    pub id: String,
    /// The matching payload.
    pub section: Arc<Section>,
}

/// Manifest plus a get-or-load cache of section payloads keyed by id.
pub struct SectionStore<S> {
    source: S,
    manifest: Vec<ManifestEntry>,
    states: HashMap<String, LoadState>,
}

impl<S: SectionSource> SectionStore<S> {
    /// Load the manifest from `source`; no payload is loaded yet.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the manifest cannot be loaded.
    pub fn open(source: S) -> Result<Self> {
        let manifest = source.load_manifest()?;
        tracing::debug!(sections = manifest.len(), "manifest loaded");
        Ok(Self {
            source,
            manifest,
            states: HashMap::new(),
        })
    }

    #[must_use]
    /// Manifest entries in display order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    fn entry(&self, id: &str) -> Option<&ManifestEntry> {
        self.manifest.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    /// Current load state of `id`; unknown and never-requested ids are `Idle`.
    pub fn state(&self, id: &str) -> LoadState {
        self.states.get(id).cloned().unwrap_or(LoadState::Idle)
    }

    /// Payload of `id`, loading it on first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSection`] for ids missing from the manifest, the source's error
    /// when the load fails, and [`Error::SectionUnavailable`] on later requests for a section
    /// whose load failed.
    pub fn get(&mut self, id: &str) -> Result<Arc<Section>> {
        let entry = self
            .entry(id)
            .cloned()
            .ok_or_else(|| Error::UnknownSection(id.to_string()))?;

        match self.state(id) {
            LoadState::Loaded(section) => return Ok(section),
            LoadState::Errored(reason) => {
                return Err(Error::SectionUnavailable {
                    id: id.to_string(),
                    reason,
                })
            }
            LoadState::Idle | LoadState::Loading => {}
        }

        self.states.insert(id.to_string(), LoadState::Loading);
        match self.source.load_section(&entry) {
            Ok(section) => {
                tracing::debug!(id, examples = section.code_examples.len(), "section loaded");
                let section = Arc::new(section);
                self.states
                    .insert(id.to_string(), LoadState::Loaded(Arc::clone(&section)));
                Ok(section)
            }
            Err(err) => {
                tracing::warn!(id, %err, "section failed to load");
                self.states
                    .insert(id.to_string(), LoadState::Errored(err.to_string()));
                Err(err)
            }
        }
    }

    /// Forget the cached state of `id`. Returns whether anything was cached.
    pub fn invalidate(&mut self, id: &str) -> bool {
        self.states.remove(id).is_some()
    }

    /// Forget every cached state.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    #[must_use]
    /// Title of `id` as listed in the manifest.
    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.entry(id).map(|entry| entry.title.as_str())
    }

    #[must_use]
    /// Id of the first section titled exactly `title`.
    pub fn id_for_title(&self, title: &str) -> Option<&str> {
        self.manifest
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| entry.id.as_str())
    }

    #[must_use]
    /// Ids before and after `id` in manifest order, or `None` for unknown ids.
    pub fn adjacent(&self, id: &str) -> Option<(Option<&str>, Option<&str>)> {
        let index = self.manifest.iter().position(|entry| entry.id == id)?;
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.manifest.get(i))
            .map(|entry| entry.id.as_str());
        let next = self.manifest.get(index + 1).map(|entry| entry.id.as_str());
        Some((prev, next))
    }

    /// Sections mentioning `keyword`, case-insensitively, in manifest order.
    ///
    /// Section titles, example titles, code and descriptions are searched. Every section is
    /// loaded as needed; ones that cannot be loaded are left out.
    pub fn search(&mut self, keyword: &str) -> Vec<SearchHit> {
        let needle = keyword.to_lowercase();
        let ids: Vec<String> = self.manifest.iter().map(|entry| entry.id.clone()).collect();

        ids.into_iter()
            .filter_map(|id| {
                let section = self.get(&id).ok()?;
                section_mentions(&section, &needle).then_some(SearchHit { id, section })
            })
            .collect()
    }
}

fn section_mentions(section: &Section, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(&section.title)
        || section.code_examples.iter().any(|example| {
            contains(&example.title)
                || contains(&example.code)
                || example.description.as_deref().is_some_and(contains)
        })
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
