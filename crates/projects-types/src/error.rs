//! Error types for payload transformation.

/// Errors that can occur while turning a listing payload into records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The body was not JSON, or not a keyed collection.
    #[error("listing payload parse failure: {0}")]
    ParseFailure(String),

    /// An entry of the collection could not be read as a project.
    #[error("invalid entry {key}: {reason}")]
    InvalidEntry {
        /// Key of the offending entry.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The `pStartTime` field of an entry is not a point in time.
    #[error("invalid pStartTime for entry {key}: {value}")]
    InvalidTimestamp {
        /// Key of the offending entry.
        key: String,
        /// The raw field value as JSON text.
        value: String,
    },
}
