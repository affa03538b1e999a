//! Per-file partial build results.
//!
//! A checkpoint holds everything a file has contributed so far, the line
//! cursor of the last completed batch, and the file's modification time when
//! the build started. A checkpoint whose timestamp no longer matches the file
//! is discarded instead of resumed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use scenedex_index::CacheIndex;

/// The saved state of a partially (or fully) built file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheckpoint {
    /// References extracted from every document before the cursor.
    pub index: CacheIndex,
    /// Modification time of the file when the build started.
    pub modified: SystemTime,
    /// Body lines consumed, always at a document boundary.
    pub lines_consumed: usize,
    /// Documents extracted before the cursor.
    pub documents: usize,
}

/// Checkpoints keyed by file path.
#[derive(Debug, Clone, Default)]
pub struct CheckpointTable {
    entries: HashMap<PathBuf, FileCheckpoint>,
}

impl CheckpointTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the checkpoint for `path` if it was taken against a file with
    /// the given modification time. A stale checkpoint is removed.
    pub fn valid(&mut self, path: &Path, modified: SystemTime) -> Option<&FileCheckpoint> {
        if self
            .entries
            .get(path)
            .is_some_and(|checkpoint| checkpoint.modified != modified)
        {
            self.entries.remove(path);
            log::debug!("{}: file changed, discarding checkpoint", path.display());
        }
        self.entries.get(path)
    }

    /// Returns the checkpoint for `path` without validating it.
    pub fn get(&self, path: &Path) -> Option<&FileCheckpoint> {
        self.entries.get(path)
    }

    /// Stores `checkpoint` for `path`, replacing any previous one.
    pub fn store(&mut self, path: &Path, checkpoint: FileCheckpoint) {
        self.entries.insert(path.to_path_buf(), checkpoint);
    }

    /// Removes and returns the checkpoint for `path`.
    pub fn remove(&mut self, path: &Path) -> Option<FileCheckpoint> {
        self.entries.remove(path)
    }

    /// Returns the number of stored checkpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no checkpoints are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
