//! Error types for extraction and incremental builds.

use std::path::PathBuf;

use scenedex_yaml::NodeKind;

/// Reasons a loaded document cannot be indexed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The document root is not a mapping.
    #[error("document root is a {kind}, expected a mapping")]
    NotAMapping {
        /// What the root actually is.
        kind: NodeKind,
    },

    /// The document root carries no anchor.
    #[error("document root has no anchor")]
    MissingAnchor,

    /// The root anchor is not an unsigned 64-bit integer.
    #[error("document anchor '{anchor}' is not an unsigned 64-bit integer")]
    InvalidAnchor {
        /// The anchor text as written.
        anchor: String,
    },
}

/// Errors that abort building a single file.
///
/// A failed build leaves the checkpoints stored before the failure intact.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The file could not be opened, read or decoded, or its checkpoint
    /// cursor no longer lines up with a document boundary.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The file being built.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A document failed to parse or to extract.
    #[error("malformed document at {path}:{line}: {reason}")]
    MalformedDocument {
        /// The file being built.
        path: PathBuf,
        /// 1-based line of the document's separator.
        line: usize,
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_mapping_display() {
        let err = ExtractError::NotAMapping {
            kind: NodeKind::Sequence,
        };
        assert_eq!(err.to_string(), "document root is a sequence, expected a mapping");
    }

    #[test]
    fn invalid_anchor_display() {
        let err = ExtractError::InvalidAnchor {
            anchor: "-5".to_string(),
        };
        assert!(err.to_string().contains("'-5'"));
    }

    #[test]
    fn io_error_display() {
        let err = BuildError::Io {
            path: PathBuf::from("Assets/Main.unity"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Assets/Main.unity"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn malformed_document_display() {
        let err = BuildError::MalformedDocument {
            path: PathBuf::from("Assets/Main.unity"),
            line: 42,
            reason: "document root has no anchor".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed document at Assets/Main.unity:42: document root has no anchor"
        );
    }
}
