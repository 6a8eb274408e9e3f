//! Root of the hierarchy: a named collection of databases.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::database::Database;
use crate::error::StoreResult;

/// The root of the hierarchy: a name-indexed collection of [`Database`]s.
///
/// Created once per process (or materialized from a persisted snapshot) and
/// shared across callers as `Arc<Repository>`. The repository's own lock
/// guards only its database index; resolving a database releases it before
/// any database- or stack-level lock is taken.
pub struct Repository {
    databases: Catalog<Database>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            databases: Catalog::new(),
        }
    }

    /// Create a database with the given name.
    ///
    /// Fails with [`crate::StoreError::AlreadyExists`] if the name is taken.
    pub fn create_database(&self, name: &str) -> StoreResult<Arc<Database>> {
        let database = self.databases.insert(Database::new(name))?;
        debug!(database = name, id = %database.id(), "database created");
        Ok(database)
    }

    /// Resolve a database by identifier or name.
    pub fn database(&self, key: &str) -> StoreResult<Arc<Database>> {
        self.databases.resolve(key)
    }

    /// Remove a database by identifier or name. All contained stacks are
    /// discarded with it.
    pub fn drop_database(&self, key: &str) -> StoreResult<()> {
        let database = self.databases.remove(key)?;
        debug!(database = %database.name(), "database dropped");
        Ok(())
    }

    /// All databases sorted by name, ascending.
    pub fn databases(&self) -> Vec<Arc<Database>> {
        self.databases.sorted()
    }

    /// Run `f` over the sorted databases while holding the repository's
    /// read lock, so no database can be created or dropped for the
    /// duration. Snapshot capture uses this to observe a consistent set of
    /// databases; persistence runs only at process start/stop, so blocking
    /// creates and drops for the walk is acceptable.
    pub fn with_databases<R>(&self, f: impl FnOnce(&[Arc<Database>]) -> R) -> R {
        self.databases.with_sorted(f)
    }

    /// Number of databases.
    pub fn database_count(&self) -> usize {
        self.databases.len()
    }

    /// Returns `true` if the repository holds no databases.
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Replace the repository's full contents with the given databases.
    /// Used when a persisted snapshot is swapped in; expected to run before
    /// concurrent request traffic exists.
    pub fn restore(&self, databases: Vec<Arc<Database>>) {
        self.databases.replace(databases);
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("database_count", &self.database_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;

    #[test]
    fn create_and_resolve_database() {
        let repo = Repository::new();
        let created = repo.create_database("orders").unwrap();
        assert_eq!(repo.database("orders").unwrap().id(), created.id());
        assert_eq!(
            repo.database(&created.id().to_string()).unwrap().id(),
            created.id()
        );
    }

    #[test]
    fn duplicate_database_name_is_rejected() {
        let repo = Repository::new();
        repo.create_database("orders").unwrap();
        let err = repo.create_database("orders").unwrap_err();
        assert_eq!(
            err,
            StoreError::AlreadyExists {
                name: "orders".into()
            }
        );
        assert_eq!(repo.database_count(), 1);
    }

    #[test]
    fn drop_database_removes_both_addressings() {
        let repo = Repository::new();
        let db = repo.create_database("orders").unwrap();
        let id = db.id().to_string();
        repo.drop_database(&id).unwrap();
        assert!(matches!(
            repo.database("orders"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            repo.database(&id),
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(repo.database_count(), 0);
    }

    #[test]
    fn enumeration_is_sorted_regardless_of_creation_order() {
        let repo = Repository::new();
        repo.create_database("z").unwrap();
        repo.create_database("a").unwrap();
        let names: Vec<_> = repo
            .databases()
            .iter()
            .map(|db| db.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "z"]);
    }

    #[test]
    fn database_name_is_reusable_after_drop() {
        let repo = Repository::new();
        let first = repo.create_database("orders").unwrap();
        repo.drop_database("orders").unwrap();
        let second = repo.create_database("orders").unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn restore_replaces_contents_wholesale() {
        let repo = Repository::new();
        repo.create_database("stale").unwrap();

        let replacement = Database::new("fresh");
        repo.restore(vec![Arc::new(replacement)]);

        assert_eq!(repo.database_count(), 1);
        assert!(repo.database("stale").is_err());
        assert!(repo.database("fresh").is_ok());
    }

    #[test]
    fn full_hierarchy_walk() {
        let repo = Repository::new();
        let db = repo.create_database("orders").unwrap();
        let stack = db.create_stack("queue1").unwrap();
        stack.push(json!({"id": 1}));

        // Resolve the whole path again from the root, as the external layer
        // does per request.
        let resolved = repo
            .database("orders")
            .unwrap()
            .stack("queue1")
            .unwrap();
        assert_eq!(resolved.peek(), Some(json!({"id": 1})));
    }

    #[test]
    fn concurrent_creates_yield_one_winner_per_name() {
        use std::thread;

        let repo = Arc::new(Repository::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || repo.create_database("contended").is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().expect("creator thread should not panic"))
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(repo.database_count(), 1);
    }
}
