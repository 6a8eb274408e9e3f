//! A named collection of stacks.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use cairn_types::DatabaseId;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::StoreResult;
use crate::stack::Stack;

/// A name-indexed collection of [`Stack`]s, itself uniquely identified and
/// named within the owning repository.
///
/// The database's own lock guards only its stack index; a resolved stack
/// handle is used after that lock is released, so operations on different
/// stacks never contend and no lock is held across levels.
pub struct Database {
    id: DatabaseId,
    name: String,
    stacks: Catalog<Stack>,
}

impl Database {
    /// Create an empty database with a fresh identifier.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: DatabaseId::new(),
            name: name.into(),
            stacks: Catalog::new(),
        }
    }

    /// Rebuild a database from persisted state, keeping its identifier and
    /// adopting the given stacks.
    pub fn restore(id: DatabaseId, name: impl Into<String>, stacks: Vec<Arc<Stack>>) -> Self {
        let catalog = Catalog::new();
        catalog.replace(stacks);
        Self {
            id,
            name: name.into(),
            stacks: catalog,
        }
    }

    /// The database's unique identifier.
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    /// The database's name, unique within the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a stack with the given name.
    ///
    /// Fails with [`crate::StoreError::AlreadyExists`] if the name is taken.
    /// The new stack starts empty with all three timestamps set to the same
    /// current instant.
    pub fn create_stack(&self, name: &str) -> StoreResult<Arc<Stack>> {
        let stack = self.stacks.insert(Stack::new(name))?;
        debug!(database = %self.name, stack = name, id = %stack.id(), "stack created");
        Ok(stack)
    }

    /// Resolve a stack by identifier or name.
    pub fn stack(&self, key: &str) -> StoreResult<Arc<Stack>> {
        self.stacks.resolve(key)
    }

    /// Remove a stack by identifier or name. Its elements are discarded with
    /// it and its name becomes immediately reusable.
    pub fn drop_stack(&self, key: &str) -> StoreResult<()> {
        let stack = self.stacks.remove(key)?;
        debug!(database = %self.name, stack = %stack.name(), "stack dropped");
        Ok(())
    }

    /// All stacks sorted by name, ascending.
    pub fn stacks(&self) -> Vec<Arc<Stack>> {
        self.stacks.sorted()
    }

    /// Run `f` over the sorted stacks while holding the database's read
    /// lock, so no stack can be created or dropped for the duration. Used
    /// by snapshot capture.
    pub fn with_stacks<R>(&self, f: impl FnOnce(&[Arc<Stack>]) -> R) -> R {
        self.stacks.with_sorted(f)
    }

    /// Number of stacks.
    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// Returns `true` if the database holds no stacks.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

impl CatalogEntry for Database {
    fn entry_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn entry_name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("stack_count", &self.stack_count())
            .finish()
    }
}
