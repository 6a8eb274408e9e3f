//! Serializable snapshot records and live-graph conversion.
//!
//! A snapshot is a plain data mirror of the hierarchy: no locks, no `Arc`s,
//! just records. [`RepositorySnapshot::capture`] walks the live graph into
//! records; [`RepositorySnapshot::restore`] rebuilds a live graph from them
//! and swaps it into a repository. Identifiers and timestamps survive both
//! directions verbatim; a restored graph is observably the captured one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cairn_store::{Database, Repository, Stack};
use cairn_types::{AccessTimes, DatabaseId, StackId};

use crate::error::{SnapshotError, SnapshotResult};

/// Point-in-time image of a full repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Databases in name order.
    pub databases: Vec<DatabaseRecord>,
}

/// One database and everything it owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    /// The database's persisted identifier, restored verbatim.
    pub id: DatabaseId,
    /// The database's name.
    pub name: String,
    /// Stacks in name order.
    pub stacks: Vec<StackRecord>,
}

/// One stack: identity, timestamps, and elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackRecord {
    /// The stack's persisted identifier, restored verbatim.
    pub id: StackId,
    /// The stack's name.
    pub name: String,
    /// All three access timestamps, restored verbatim.
    pub times: AccessTimes,
    /// Elements in push order (bottom first), each stored as its JSON byte
    /// encoding. A self-describing JSON value cannot be decoded out of the
    /// binary payload directly, so elements are embedded as opaque bytes
    /// and round-trip losslessly for every JSON-representable type.
    pub elements: Vec<Vec<u8>>,
}

impl RepositorySnapshot {
    /// Capture the full repository graph.
    ///
    /// Holds the repository's read lock for the whole walk, so no database
    /// can be created or dropped while the snapshot is being produced; each
    /// database and stack is read-locked briefly as it is visited.
    pub fn capture(repository: &Repository) -> SnapshotResult<Self> {
        let databases = repository.with_databases(|databases| {
            databases
                .iter()
                .map(|db| DatabaseRecord::capture(db))
                .collect::<SnapshotResult<Vec<_>>>()
        })?;
        Ok(Self { databases })
    }

    /// Rebuild a live graph from the records and swap it into `repository`,
    /// wholesale replacing its previous contents.
    pub fn restore(&self, repository: &Repository) -> SnapshotResult<()> {
        let databases = self
            .databases
            .iter()
            .map(|record| record.to_database().map(Arc::new))
            .collect::<SnapshotResult<Vec<_>>>()?;
        repository.restore(databases);
        Ok(())
    }

    /// Total number of stacks across all databases. Logging convenience.
    pub fn stack_count(&self) -> usize {
        self.databases.iter().map(|db| db.stacks.len()).sum()
    }
}

impl DatabaseRecord {
    fn capture(database: &Database) -> SnapshotResult<Self> {
        let stacks = database.with_stacks(|stacks| {
            stacks
                .iter()
                .map(|stack| StackRecord::capture(stack))
                .collect::<SnapshotResult<Vec<_>>>()
        })?;
        Ok(Self {
            id: database.id(),
            name: database.name().to_string(),
            stacks,
        })
    }

    fn to_database(&self) -> SnapshotResult<Database> {
        let stacks = self
            .stacks
            .iter()
            .map(|record| record.to_stack().map(Arc::new))
            .collect::<SnapshotResult<Vec<_>>>()?;
        Ok(Database::restore(self.id, &self.name, stacks))
    }
}

impl StackRecord {
    fn capture(stack: &Stack) -> SnapshotResult<Self> {
        let (times, elements) = stack.snapshot_state();
        let elements = elements
            .iter()
            .map(|element| {
                serde_json::to_vec(element)
                    .map_err(|e| SnapshotError::Serialization(e.to_string()))
            })
            .collect::<SnapshotResult<Vec<_>>>()?;
        Ok(Self {
            id: stack.id(),
            name: stack.name().to_string(),
            times,
            elements,
        })
    }

    fn to_stack(&self) -> SnapshotResult<Stack> {
        let elements = self
            .elements
            .iter()
            .map(|bytes| {
                serde_json::from_slice(bytes).map_err(|e| SnapshotError::Corrupt {
                    reason: format!("undecodable element in stack {:?}: {e}", self.name),
                })
            })
            .collect::<SnapshotResult<Vec<_>>>()?;
        Ok(Stack::restore(self.id, &self.name, self.times, elements))
    }
}
