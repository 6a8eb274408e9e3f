use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The string is not a syntactically valid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}
