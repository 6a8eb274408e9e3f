use thiserror::Error;

/// Errors from engine lifecycle operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Loading or saving the snapshot file failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] cairn_snapshot::SnapshotError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
