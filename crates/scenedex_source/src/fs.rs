//! File-system access behind a narrow trait.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// The file operations the indexer needs: a modification timestamp for
/// checkpoint validation, and a forward-only byte stream.
pub trait SourceFs {
    /// Returns the last modification time of the file at `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Opens the file at `path` for reading from the beginning.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>>;
}

/// [`SourceFs`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl SourceFs for DiskFs {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(path)?))
    }
}

/// An in-memory file table with explicit modification times.
///
/// Useful for tests that need to change a file's content and timestamp
/// deterministically between builds.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, MemoryFile>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Arc<[u8]>,
    modified: SystemTime,
}

impl MemoryFs {
    /// Creates an empty file table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(
        &mut self,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
        modified: SystemTime,
    ) {
        let bytes: Vec<u8> = content.into();
        let file = MemoryFile {
            content: Arc::from(bytes),
            modified,
        };
        self.files.insert(path.into(), file);
    }

    /// Removes a file, returning `true` if it existed.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.files.remove(path).is_some()
    }

    /// Returns `true` if a file exists at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn get(&self, path: &Path) -> io::Result<&MemoryFile> {
        self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

impl SourceFs for MemoryFs {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        Ok(self.get(path)?.modified)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let content = Arc::clone(&self.get(path)?.content);
        Ok(Box::new(Cursor::new(content)))
    }
}
