use thiserror::Error;

/// Errors from snapshot persistence.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error while reading or writing the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode the snapshot.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The file's payload could not be decoded into a repository graph.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The file is not a valid snapshot (bad magic, truncation, checksum
    /// mismatch, or undecodable element data).
    #[error("corrupt snapshot: {reason}")]
    Corrupt { reason: String },

    /// The file carries a format version this build does not understand.
    #[error("unsupported snapshot format version: {found}")]
    UnsupportedVersion { found: u32 },
}

/// Result alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
