//! Mergeable reference indexes for scene files.
//!
//! A [`CacheIndex`] counts anchor and guid references and records component
//! attachments for one scope: a batch of documents, one file, or the whole
//! project. The [`GlobalIndex`] keeps one index per committed file plus their
//! combined sum, and can replace a file's contribution in place.

#![warn(missing_docs)]

pub mod cache_index;
pub mod global;

pub use cache_index::CacheIndex;
pub use global::GlobalIndex;
