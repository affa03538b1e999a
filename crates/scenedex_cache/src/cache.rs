//! The indexer's top-level handle.
//!
//! [`AssetCache`] owns an [`IncrementalBuilder`] and the project-wide
//! [`GlobalIndex`]. Builds produce per-file indexes; nothing becomes visible
//! to queries until the caller commits it.

use std::path::Path;

use scenedex_common::Anchor;
use scenedex_config::BuildConfig;
use scenedex_index::{CacheIndex, GlobalIndex};
use scenedex_source::{DiskFs, SourceFs};
use scenedex_yaml::{DocumentLoader, YamlEventLoader};

use crate::builder::{BuildOutcome, IncrementalBuilder, InterruptSignal};
use crate::error::BuildError;

/// Incremental builder plus the committed global index.
pub struct AssetCache<F = DiskFs, L = YamlEventLoader> {
    builder: IncrementalBuilder<F, L>,
    global: GlobalIndex,
}

impl AssetCache {
    /// Creates a cache that reads files from disk.
    pub fn new(config: &BuildConfig) -> Self {
        Self::with_fs(DiskFs, config)
    }
}

impl<F: SourceFs> AssetCache<F> {
    /// Creates a cache that reads files through `fs`.
    pub fn with_fs(fs: F, config: &BuildConfig) -> Self {
        Self::from_builder(IncrementalBuilder::new(fs, config))
    }
}

impl<F: SourceFs, L: DocumentLoader> AssetCache<F, L> {
    /// Creates a cache around an existing builder with an empty global index.
    pub fn from_builder(builder: IncrementalBuilder<F, L>) -> Self {
        Self {
            builder,
            global: GlobalIndex::new(),
        }
    }

    /// Builds (or resumes building) the file at `path`.
    ///
    /// See [`IncrementalBuilder::build`]. The result is not committed.
    pub fn build<S>(&mut self, path: &Path, signal: &mut S) -> Result<BuildOutcome, BuildError>
    where
        S: InterruptSignal + ?Sized,
    {
        self.builder.build(path, signal)
    }

    /// Replaces the committed contribution of `path` with `index` and drops
    /// the file's checkpoint.
    pub fn commit(&mut self, path: &Path, index: CacheIndex) {
        self.global.commit(path, index);
        self.builder.discard_checkpoint(path);
    }

    /// Removes everything known about `path`, returning its committed index.
    pub fn forget(&mut self, path: &Path) -> Option<CacheIndex> {
        self.builder.discard_checkpoint(path);
        self.global.remove(path)
    }

    /// Returns how often `anchor` is referenced across committed files.
    pub fn local_anchor_usages(&self, anchor: Anchor) -> u64 {
        self.global.anchor_usages(anchor)
    }

    /// Returns how often `guid` is referenced across committed files.
    pub fn guid_usages(&self, guid: &str) -> u64 {
        self.global.guid_usages(guid)
    }

    /// Returns the components attached to `anchor` across committed files.
    pub fn components_for(&self, anchor: Anchor) -> &[Anchor] {
        self.global.components_of(anchor)
    }

    /// Returns the committed global index.
    pub fn global(&self) -> &GlobalIndex {
        &self.global
    }

    /// Returns the builder.
    pub fn builder(&self) -> &IncrementalBuilder<F, L> {
        &self.builder
    }

    /// Returns the file system the cache reads from, mutably.
    pub fn fs_mut(&mut self) -> &mut F {
        self.builder.fs_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildProgress, NeverInterrupt};
    use scenedex_source::MemoryFs;
    use std::ops::ControlFlow;
    use std::time::{Duration, SystemTime};

    const PREFAB: &str = "\
%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &10
GameObject:
  m_Component:
  - component: {fileID: 11}
--- !u!4 &11
Transform:
  m_GameObject: {fileID: 10}
  m_Material: {fileID: 2100000, guid: bb7e9cca953d340059eb1e053bbbae31, type: 2}
";

    fn cache() -> AssetCache<MemoryFs> {
        let mut fs = MemoryFs::new();
        fs.insert("a.prefab", PREFAB, SystemTime::UNIX_EPOCH);
        AssetCache::with_fs(fs, &BuildConfig::with_batch_size(1))
    }

    fn build_and_commit(cache: &mut AssetCache<MemoryFs>, path: &Path) {
        let index = cache
            .build(path, &mut NeverInterrupt)
            .unwrap()
            .into_index()
            .unwrap();
        cache.commit(path, index);
    }

    #[test]
    fn build_is_invisible_until_commit() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        let index = cache
            .build(path, &mut NeverInterrupt)
            .unwrap()
            .into_index()
            .unwrap();
        assert_eq!(cache.local_anchor_usages(Anchor::new(10)), 0);

        cache.commit(path, index);
        assert_eq!(cache.local_anchor_usages(Anchor::new(10)), 1);
        assert_eq!(cache.guid_usages("bb7e9cca953d340059eb1e053bbbae31"), 1);
        assert_eq!(cache.components_for(Anchor::new(10)), &[Anchor::new(11)]);
    }

    #[test]
    fn commit_drops_checkpoint() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        build_and_commit(&mut cache, path);
        assert!(cache.builder().checkpoints().get(path).is_none());
    }

    #[test]
    fn cancelled_build_keeps_checkpoint() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        let outcome = cache
            .build(path, &mut |_: &BuildProgress| ControlFlow::Break(()))
            .unwrap();
        assert!(!outcome.is_complete());
        assert!(cache.builder().checkpoints().get(path).is_some());
    }

    #[test]
    fn rebuild_and_recommit_is_idempotent() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        build_and_commit(&mut cache, path);
        build_and_commit(&mut cache, path);
        assert_eq!(cache.local_anchor_usages(Anchor::new(10)), 1);
        assert_eq!(cache.local_anchor_usages(Anchor::new(11)), 1);
        assert_eq!(cache.components_for(Anchor::new(10)), &[Anchor::new(11)]);
    }

    #[test]
    fn forget_removes_contribution() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        build_and_commit(&mut cache, path);
        assert!(cache.forget(path).is_some());
        assert_eq!(cache.local_anchor_usages(Anchor::new(10)), 0);
        assert!(cache.global().is_empty());
    }

    #[test]
    fn edited_file_replaces_old_counts() {
        let mut cache = cache();
        let path = Path::new("a.prefab");
        build_and_commit(&mut cache, path);

        let edited = PREFAB.replace("guid: bb7e9cca953d340059eb1e053bbbae31", "guid: 0123abcd");
        cache
            .fs_mut()
            .insert("a.prefab", edited, SystemTime::UNIX_EPOCH + Duration::from_secs(5));
        build_and_commit(&mut cache, path);
        assert_eq!(cache.guid_usages("bb7e9cca953d340059eb1e053bbbae31"), 0);
        assert_eq!(cache.guid_usages("0123abcd"), 1);
    }
}
