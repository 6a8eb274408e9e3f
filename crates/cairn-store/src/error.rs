use thiserror::Error;

/// Errors from hierarchy operations.
///
/// Both levels of the hierarchy fail the same two ways; nothing is retried
/// internally and every failure is a synchronous return value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No database or stack matches the given identifier or name.
    #[error("not found: {key}")]
    NotFound { key: String },

    /// A sibling entry with this name already exists.
    #[error("already exists: {name}")]
    AlreadyExists { name: String },
}

/// Result alias for hierarchy operations.
pub type StoreResult<T> = Result<T, StoreError>;
