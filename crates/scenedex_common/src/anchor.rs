//! Local object identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An unsigned 64-bit object identifier, unique within one scene file.
///
/// Every top-level document in a scene file declares one anchor, and
/// `fileID` fields elsewhere refer back to it. The value `0` is reserved
/// for "no reference" and is never counted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(u64);

impl Anchor {
    /// The reserved "no reference" anchor.
    pub const NONE: Anchor = Anchor(0);

    /// Creates an anchor from its raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value of this anchor.
    pub fn as_raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the reserved [`Anchor::NONE`] value.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Anchor {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Anchor({})", self.0)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid unsigned 64-bit anchor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid anchor: '{input}'")]
pub struct ParseAnchorError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    /// Parses a decimal anchor. Surrounding whitespace is ignored; signs,
    /// fractions and out-of-range values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('+') {
            return Err(ParseAnchorError {
                input: s.to_string(),
            });
        }
        trimmed.parse::<u64>().map(Anchor).map_err(|_| ParseAnchorError {
            input: s.to_string(),
        })
    }
}
