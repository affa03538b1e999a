//! Streaming access to multi-document scene YAML.
//!
//! Scene files put their directives once at the top and then concatenate
//! thousands of small documents. This crate cuts such a stream into
//! self-contained document texts and loads each one into a small generic
//! tree.
//!
//! # Architecture
//!
//! - **Splitter** ([`splitter`]): turns a byte stream into a lazy sequence of
//!   [`RawDocument`]s, prefixing the shared header onto each and repairing the
//!   `stripped` separator quirk. Resumable from a line cursor.
//! - **Node tree** ([`node`]): the closed scalar/sequence/mapping tree the
//!   extractor walks.
//! - **Loader** ([`loader`]): the [`DocumentLoader`] seam and its
//!   `yaml-rust2` event-parser implementation.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod node;
pub mod splitter;

pub use error::LoadError;
pub use loader::{DocumentLoader, YamlEventLoader};
pub use node::{Mapping, Node, NodeKind};
pub use splitter::{DocumentSplitter, RawDocument};
