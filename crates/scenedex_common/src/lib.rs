//! Shared foundational types used across the scenedex indexer.
//!
//! This crate provides the two reference kinds the indexer counts: local
//! object [`Anchor`]s and external asset [`Guid`]s.

#![warn(missing_docs)]

pub mod anchor;
pub mod guid;

pub use anchor::{Anchor, ParseAnchorError};
pub use guid::Guid;
