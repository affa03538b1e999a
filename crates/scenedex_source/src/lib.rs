//! Source file access and text decoding for scene files.
//!
//! This crate provides the [`SourceFs`] contract the indexer reads files
//! through (with [`DiskFs`] for real files and [`MemoryFs`] for tests), and
//! the [`LineReader`] that sniffs a byte-order mark and streams decoded lines.

#![warn(missing_docs)]

pub mod decode;
pub mod fs;

pub use decode::{Encoding, LineReader};
pub use fs::{DiskFs, MemoryFs, SourceFs};
