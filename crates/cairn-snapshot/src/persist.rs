//! Save/load directly on a repository.

use std::path::Path;

use cairn_store::Repository;

use crate::error::SnapshotResult;
use crate::record::RepositorySnapshot;

/// Whole-repository persistence as repository methods.
///
/// Thin sugar over [`RepositorySnapshot`]: capture-and-write on save,
/// read-and-restore on load. Embedders that manage their own lifecycle can
/// use this directly; the engine crate wraps the same primitives with
/// configuration and logging.
pub trait Persist {
    /// Capture the full graph and write it to `path`, overwriting any
    /// existing file.
    fn save(&self, path: &Path) -> SnapshotResult<()>;

    /// Replace the repository's contents from the file at `path`. An absent
    /// file leaves the repository untouched: that is the valid initial
    /// state, not an error.
    fn load(&self, path: &Path) -> SnapshotResult<()>;
}

impl Persist for Repository {
    fn save(&self, path: &Path) -> SnapshotResult<()> {
        RepositorySnapshot::capture(self)?.write_to(path)
    }

    fn load(&self, path: &Path) -> SnapshotResult<()> {
        if let Some(snapshot) = RepositorySnapshot::read_from(path)? {
            snapshot.restore(self)?;
        }
        Ok(())
    }
}
