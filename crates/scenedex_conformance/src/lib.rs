//! Conformance test helpers for the scenedex indexer.
//!
//! Provides the shared scene fixture, an in-memory project setup, and
//! build drivers that run a file through cancel/resume cycles, so the
//! integration tests can assert on committed indexes directly.

#![warn(missing_docs)]

use std::ops::ControlFlow;
use std::path::Path;
use std::time::{Duration, SystemTime};

use scenedex_cache::{AssetCache, BuildOutcome, BuildProgress, InterruptSignal, NeverInterrupt};
use scenedex_config::BuildConfig;
use scenedex_index::CacheIndex;
use scenedex_source::MemoryFs;

/// A five-document scene with two component lists, a `stripped` separator,
/// null references and repeated script guids.
pub const SMALL_SCENE: &str = include_str!("../fixtures/small_scene.unity");

/// Number of documents in [`SMALL_SCENE`].
pub const SMALL_SCENE_DOCUMENTS: usize = 5;

/// Returns a timestamp `secs` seconds after the epoch.
pub fn timestamp(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

/// Creates an in-memory cache holding `files`, all stamped with
/// [`timestamp(1)`](timestamp).
pub fn memory_cache(files: &[(&str, &str)], batch_size: usize) -> AssetCache<MemoryFs> {
    let mut fs = MemoryFs::new();
    for (path, content) in files {
        fs.insert(*path, *content, timestamp(1));
    }
    AssetCache::with_fs(fs, &BuildConfig::with_batch_size(batch_size))
}

/// Stops every build call once it has processed `documents` documents.
///
/// With a batch size of 1 this cancels after exactly `documents` documents;
/// larger batches stop at the first checkpoint at or past that count.
#[derive(Debug, Clone, Copy)]
pub struct CancelAfter {
    documents: usize,
}

impl CancelAfter {
    /// Creates a signal that cancels after `documents` documents per call.
    pub fn new(documents: usize) -> Self {
        Self { documents }
    }
}

impl InterruptSignal for CancelAfter {
    fn check(&mut self, progress: &BuildProgress) -> ControlFlow<()> {
        if progress.documents_processed >= self.documents {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Outcome of driving one file to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrivenBuild {
    /// The completed file index.
    pub index: CacheIndex,
    /// Build calls made, including the completing one.
    pub passes: usize,
}

/// Calls `build` until the file completes, without committing.
///
/// # Panics
///
/// Panics if a build fails or if the file needs more than 10 000 passes.
pub fn build_to_completion<S>(
    cache: &mut AssetCache<MemoryFs>,
    path: &str,
    signal: &mut S,
) -> DrivenBuild
where
    S: InterruptSignal,
{
    for passes in 1..=10_000 {
        match cache.build(Path::new(path), signal) {
            Ok(BuildOutcome::Complete(index)) => return DrivenBuild { index, passes },
            Ok(BuildOutcome::Cancelled(_)) => {}
            Err(e) => panic!("build of {path} failed: {e}"),
        }
    }
    panic!("build of {path} did not complete");
}

/// Builds `path` in one uninterrupted pass and commits the result.
///
/// # Panics
///
/// Panics if the build fails.
pub fn build_and_commit(cache: &mut AssetCache<MemoryFs>, path: &str) -> CacheIndex {
    let driven = build_to_completion(cache, path, &mut NeverInterrupt);
    cache.commit(Path::new(path), driven.index.clone());
    driven.index
}

/// Builds [`SMALL_SCENE`] in one pass with the default batch size.
pub fn small_scene_index() -> CacheIndex {
    let mut cache = memory_cache(&[("Small.unity", SMALL_SCENE)], 5000);
    build_to_completion(&mut cache, "Small.unity", &mut NeverInterrupt).index
}
