//! Incremental, resumable indexing of scene files.
//!
//! This crate turns one file at a time into a [`CacheIndex`] and keeps the
//! project-wide [`GlobalIndex`] current as files are rebuilt.
//!
//! # Architecture
//!
//! - **Extraction** ([`extract`]): walks one loaded document and counts its
//!   anchor and guid references and component lists.
//! - **Checkpoints** ([`checkpoint`]): per-file partial results keyed by
//!   modification time, so an interrupted build resumes where it stopped.
//! - **Builder** ([`builder`]): drives split, load and extract in batches,
//!   checkpointing and polling an [`InterruptSignal`] after each batch.
//! - **Cache** ([`cache`]): the [`AssetCache`] facade combining the builder
//!   with the global index and its queries.
//!
//! [`CacheIndex`]: scenedex_index::CacheIndex
//! [`GlobalIndex`]: scenedex_index::GlobalIndex

#![warn(missing_docs)]

pub mod builder;
pub mod cache;
pub mod checkpoint;
pub mod error;
pub mod extract;

pub use builder::{BuildOutcome, BuildProgress, IncrementalBuilder, InterruptSignal, NeverInterrupt};
pub use cache::AssetCache;
pub use checkpoint::{CheckpointTable, FileCheckpoint};
pub use error::{BuildError, ExtractError};
pub use extract::{extract_document, DocumentRefs};
