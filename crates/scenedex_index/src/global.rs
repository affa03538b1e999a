//! The project-wide aggregate of committed file indexes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use scenedex_common::Anchor;

use crate::cache_index::CacheIndex;

/// Combined index over every committed file.
///
/// Keeps the exact [`CacheIndex`] each path contributed so that committing a
/// path again first subtracts its previous contribution. The combined index
/// always equals the merge of the per-path indexes, except for the component
/// lists noted on [`CacheIndex::subtract`].
#[derive(Debug, Default)]
pub struct GlobalIndex {
    combined: CacheIndex,
    files: HashMap<PathBuf, CacheIndex>,
}

impl GlobalIndex {
    /// Creates an empty global index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a completed file index into the aggregate, replacing any
    /// earlier contribution from the same path.
    ///
    /// Returns the replaced file index, if there was one.
    pub fn commit(&mut self, path: impl Into<PathBuf>, index: CacheIndex) -> Option<CacheIndex> {
        let path = path.into();
        let previous = self.remove(&path);
        self.combined.merge(&index);
        log::debug!(
            "committed {} ({} references{})",
            path.display(),
            index.reference_count(),
            if previous.is_some() { ", replaced" } else { "" }
        );
        self.files.insert(path, index);
        previous
    }

    /// Removes a file's contribution from the aggregate.
    pub fn remove(&mut self, path: &Path) -> Option<CacheIndex> {
        let previous = self.files.remove(path)?;
        self.combined.subtract(&previous);
        Some(previous)
    }

    /// Returns how many times `anchor` is referenced across all files.
    pub fn anchor_usages(&self, anchor: Anchor) -> u64 {
        self.combined.anchor_usages(anchor)
    }

    /// Returns how many times `guid` is referenced across all files.
    pub fn guid_usages(&self, guid: &str) -> u64 {
        self.combined.guid_usages(guid)
    }

    /// Returns the components attached to `anchor`, concatenated in commit
    /// order.
    pub fn components_of(&self, anchor: Anchor) -> &[Anchor] {
        self.combined.attached_components(anchor)
    }

    /// Returns the combined index.
    pub fn combined(&self) -> &CacheIndex {
        &self.combined
    }

    /// Returns the index committed for `path`.
    pub fn file_index(&self, path: &Path) -> Option<&CacheIndex> {
        self.files.get(path)
    }

    /// Iterates over committed paths in arbitrary order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Returns the number of committed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has been committed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
