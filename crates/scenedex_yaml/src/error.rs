//! Error types for document loading.

/// Errors reported by a [`DocumentLoader`](crate::DocumentLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document text is not valid YAML.
    #[error("invalid YAML: {reason}")]
    Syntax {
        /// Description of the parser failure.
        reason: String,
    },
}
