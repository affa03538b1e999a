//! Batched, checkpointed and interruptible per-file builds.
//!
//! [`IncrementalBuilder::build`] streams a file through the splitter, loads
//! and extracts each document, and accumulates the results in batches. After
//! every full batch (and once more for a non-empty final batch) it merges the
//! batch into the file's index, stores a checkpoint, and only then asks the
//! caller's [`InterruptSignal`] whether to keep going. A cancelled build loses
//! nothing: the next call for the same unchanged file resumes at the last
//! checkpoint.

use std::io;
use std::ops::ControlFlow;
use std::path::Path;
use std::time::SystemTime;

use scenedex_config::BuildConfig;
use scenedex_index::CacheIndex;
use scenedex_source::SourceFs;
use scenedex_yaml::{DocumentLoader, DocumentSplitter, YamlEventLoader};

use crate::checkpoint::{CheckpointTable, FileCheckpoint};
use crate::error::BuildError;
use crate::extract::extract_document;

/// Where a build stands when it reaches a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    /// Documents extracted by the current call.
    pub documents_processed: usize,
    /// Documents extracted from the file so far, across resumed calls.
    pub documents_total: usize,
    /// Body lines covered by the latest checkpoint.
    pub lines_consumed: usize,
}

/// Decides at every checkpoint whether a build continues.
///
/// Implemented for any `FnMut(&BuildProgress) -> ControlFlow<()>`.
pub trait InterruptSignal {
    /// Returns [`ControlFlow::Break`] to stop the build after the checkpoint
    /// that was just stored.
    fn check(&mut self, progress: &BuildProgress) -> ControlFlow<()>;
}

impl<F> InterruptSignal for F
where
    F: FnMut(&BuildProgress) -> ControlFlow<()>,
{
    fn check(&mut self, progress: &BuildProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// A signal that never stops a build.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl InterruptSignal for NeverInterrupt {
    fn check(&mut self, _progress: &BuildProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// The result of one [`IncrementalBuilder::build`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The whole file was indexed.
    Complete(CacheIndex),
    /// The signal stopped the build; calling `build` again resumes it.
    Cancelled(BuildProgress),
}

impl BuildOutcome {
    /// Returns `true` if the build ran to the end of the file.
    pub fn is_complete(&self) -> bool {
        matches!(self, BuildOutcome::Complete(_))
    }

    /// Returns the file index of a complete build.
    pub fn into_index(self) -> Option<CacheIndex> {
        match self {
            BuildOutcome::Complete(index) => Some(index),
            BuildOutcome::Cancelled(_) => None,
        }
    }
}

/// Builds per-file indexes, resuming from its own checkpoint table.
pub struct IncrementalBuilder<F, L = YamlEventLoader> {
    fs: F,
    loader: L,
    batch_size: usize,
    checkpoints: CheckpointTable,
}

impl<F: SourceFs> IncrementalBuilder<F> {
    /// Creates a builder reading through `fs` with the default YAML loader.
    pub fn new(fs: F, config: &BuildConfig) -> Self {
        Self::with_loader(fs, YamlEventLoader, config)
    }
}

impl<F: SourceFs, L: DocumentLoader> IncrementalBuilder<F, L> {
    /// Creates a builder with an explicit document loader.
    ///
    /// A batch size of `0` is treated as `1`.
    pub fn with_loader(fs: F, loader: L, config: &BuildConfig) -> Self {
        Self {
            fs,
            loader,
            batch_size: config.batch_size.max(1),
            checkpoints: CheckpointTable::new(),
        }
    }

    /// Returns the number of documents per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the file system the builder reads from.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Returns the file system mutably, e.g. to update an in-memory file.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    /// Returns the stored checkpoints.
    pub fn checkpoints(&self) -> &CheckpointTable {
        &self.checkpoints
    }

    /// Drops the checkpoint for `path`, returning `true` if one existed.
    pub fn discard_checkpoint(&mut self, path: &Path) -> bool {
        self.checkpoints.remove(path).is_some()
    }

    /// Builds the index for the file at `path`.
    ///
    /// Resumes from the stored checkpoint when the file's modification time
    /// still matches it, and starts over otherwise. On error, checkpoints
    /// stored earlier in this call are kept.
    ///
    /// The signal runs after every full batch and once more at end of file,
    /// unless that final batch is empty, so a signal that always breaks still
    /// lets the build complete.
    pub fn build<S>(&mut self, path: &Path, signal: &mut S) -> Result<BuildOutcome, BuildError>
    where
        S: InterruptSignal + ?Sized,
    {
        let io_error = |source: io::Error| BuildError::Io {
            path: path.to_path_buf(),
            source,
        };

        let modified = self.fs.modified(path).map_err(io_error)?;
        let (mut file_index, start, resumed_documents) =
            match self.checkpoints.valid(path, modified) {
                Some(checkpoint) => {
                    log::debug!(
                        "{}: resuming at line {} after {} documents",
                        path.display(),
                        checkpoint.lines_consumed,
                        checkpoint.documents
                    );
                    (
                        checkpoint.index.clone(),
                        checkpoint.lines_consumed,
                        checkpoint.documents,
                    )
                }
                None => (CacheIndex::new(), 0, 0),
            };

        let reader = self.fs.open(path).map_err(io_error)?;
        let mut splitter = DocumentSplitter::resume(reader, start).map_err(io_error)?;

        let mut batch = CacheIndex::new();
        let mut in_batch = 0;
        let mut processed = 0;
        while let Some(document) = splitter.next_document().map_err(io_error)? {
            let malformed = |reason: String| BuildError::MalformedDocument {
                path: path.to_path_buf(),
                line: document.line,
                reason,
            };
            let Some(root) = self
                .loader
                .load(&document.text)
                .map_err(|e| malformed(e.to_string()))?
            else {
                log::debug!("{}:{}: skipping empty document", path.display(), document.line);
                continue;
            };
            let refs = extract_document(&root).map_err(|e| malformed(e.to_string()))?;
            batch.merge(&refs.index);
            in_batch += 1;
            processed += 1;

            if in_batch == self.batch_size {
                let progress = BuildProgress {
                    documents_processed: processed,
                    documents_total: resumed_documents + processed,
                    lines_consumed: splitter.cursor(),
                };
                self.checkpoint(path, modified, &mut file_index, &mut batch, &progress);
                in_batch = 0;
                if signal.check(&progress).is_break() {
                    log_cancelled(path, &progress);
                    return Ok(BuildOutcome::Cancelled(progress));
                }
            }
        }

        if in_batch > 0 {
            let progress = BuildProgress {
                documents_processed: processed,
                documents_total: resumed_documents + processed,
                lines_consumed: splitter.cursor(),
            };
            self.checkpoint(path, modified, &mut file_index, &mut batch, &progress);
            if signal.check(&progress).is_break() {
                log_cancelled(path, &progress);
                return Ok(BuildOutcome::Cancelled(progress));
            }
        }

        log::info!(
            "indexed {}: {} documents, {} references",
            path.display(),
            resumed_documents + processed,
            file_index.reference_count()
        );
        Ok(BuildOutcome::Complete(file_index))
    }

    /// Folds the batch into the file index and records the checkpoint.
    fn checkpoint(
        &mut self,
        path: &Path,
        modified: SystemTime,
        file_index: &mut CacheIndex,
        batch: &mut CacheIndex,
        progress: &BuildProgress,
    ) {
        file_index.merge(batch);
        *batch = CacheIndex::new();
        self.checkpoints.store(
            path,
            FileCheckpoint {
                index: file_index.clone(),
                modified,
                lines_consumed: progress.lines_consumed,
                documents: progress.documents_total,
            },
        );
        log::debug!(
            "{}: checkpoint at line {} ({} documents)",
            path.display(),
            progress.lines_consumed,
            progress.documents_total
        );
    }
}

fn log_cancelled(path: &Path, progress: &BuildProgress) {
    log::debug!(
        "{}: build interrupted at line {} ({} documents)",
        path.display(),
        progress.lines_consumed,
        progress.documents_total
    );
}
