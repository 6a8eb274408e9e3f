//! Generic name-indexed collection with dual id-or-name addressing.
//!
//! Both levels of the hierarchy (repository to database, database to stack)
//! are instances of [`Catalog`], so the resolution, creation, deletion, and
//! enumeration logic exists exactly once.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// A catalog entry: named, and addressable by an opaque unique identifier.
pub trait CatalogEntry {
    /// The entry's unique identifier.
    fn entry_id(&self) -> Uuid;

    /// The entry's human-assigned name, unique among siblings.
    fn entry_name(&self) -> &str;
}

/// Concurrency-safe collection of uniquely identified, named entries.
///
/// Entries are indexed by name (case-sensitive, the authoritative key) and
/// held as `Arc`, so a resolved handle stays valid after the catalog's lock
/// is released; callers never hold this lock while operating on an entry.
///
/// Resolution accepts either form of address. If the input parses as a UUID
/// and matches an entry's identifier, that entry wins; otherwise an exact
/// name lookup is attempted. A name that happens to parse as a UUID can
/// therefore be shadowed by an identifier match, an accepted quirk of the
/// dual addressing scheme, kept rather than "fixed".
pub struct Catalog<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly created entry under its own name.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the name is taken; the
    /// existing entry is left untouched.
    pub fn insert(&self, entry: T) -> StoreResult<Arc<T>> {
        let mut entries = self.entries.write().expect("lock poisoned");
        let name = entry.entry_name();
        if entries.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let name = name.to_string();
        let entry = Arc::new(entry);
        entries.insert(name, Arc::clone(&entry));
        Ok(entry)
    }

    /// Resolve an entry by identifier or name.
    ///
    /// Identifier match takes precedence when the input is syntactically a
    /// valid UUID; on parse failure or identifier miss, an exact name lookup
    /// is still attempted.
    pub fn resolve(&self, key: &str) -> StoreResult<Arc<T>> {
        let entries = self.entries.read().expect("lock poisoned");
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(entry) = entries.values().find(|e| e.entry_id() == id) {
                return Ok(Arc::clone(entry));
            }
        }
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    /// Remove an entry by identifier or name, returning it.
    ///
    /// Uses the same dual resolution rule as [`Catalog::resolve`]. There is
    /// no soft-delete: the entry is gone and its name is immediately free
    /// for reuse.
    pub fn remove(&self, key: &str) -> StoreResult<Arc<T>> {
        let mut entries = self.entries.write().expect("lock poisoned");
        let by_id = Uuid::parse_str(key).ok().and_then(|id| {
            entries
                .values()
                .find(|e| e.entry_id() == id)
                .map(|e| e.entry_name().to_string())
        });
        let name = match by_id {
            Some(name) => name,
            None if entries.contains_key(key) => key.to_string(),
            None => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                })
            }
        };
        Ok(entries
            .remove(&name)
            .expect("entry resolved under the same lock"))
    }

    /// All entries sorted by name, ascending.
    pub fn sorted(&self) -> Vec<Arc<T>> {
        let entries = self.entries.read().expect("lock poisoned");
        let mut list: Vec<Arc<T>> = entries.values().cloned().collect();
        list.sort_by(|a, b| a.entry_name().cmp(b.entry_name()));
        list
    }

    /// Run `f` over the sorted entries while holding the read lock, so no
    /// entry can be added or removed for the duration. Used by snapshot
    /// capture; per-request paths use [`Catalog::sorted`] instead, which
    /// releases the lock before returning.
    pub fn with_sorted<R>(&self, f: impl FnOnce(&[Arc<T>]) -> R) -> R {
        let entries = self.entries.read().expect("lock poisoned");
        let mut list: Vec<Arc<T>> = entries.values().cloned().collect();
        list.sort_by(|a, b| a.entry_name().cmp(b.entry_name()));
        f(&list)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Replace the full contents with the given entries, keyed by their own
    /// names. Used when a persisted snapshot is swapped in.
    pub fn replace(&self, new_entries: Vec<Arc<T>>) {
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.clear();
        for entry in new_entries {
            entries.insert(entry.entry_name().to_string(), entry);
        }
    }
}

impl<T: CatalogEntry> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        id: Uuid,
        name: String,
    }

    impl Item {
        fn new(name: &str) -> Self {
            Self {
                id: Uuid::now_v7(),
                name: name.to_string(),
            }
        }
    }

    impl CatalogEntry for Item {
        fn entry_id(&self) -> Uuid {
            self.id
        }

        fn entry_name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn insert_then_resolve_by_name() {
        let catalog = Catalog::new();
        catalog.insert(Item::new("alpha")).unwrap();
        let found = catalog.resolve("alpha").unwrap();
        assert_eq!(found.entry_name(), "alpha");
    }

    #[test]
    fn insert_then_resolve_by_id() {
        let catalog = Catalog::new();
        let item = catalog.insert(Item::new("alpha")).unwrap();
        let found = catalog.resolve(&item.entry_id().to_string()).unwrap();
        assert_eq!(found.entry_id(), item.entry_id());
    }

    #[test]
    fn duplicate_name_is_rejected_and_original_kept() {
        let catalog = Catalog::new();
        let original = catalog.insert(Item::new("alpha")).unwrap();
        let err = catalog.insert(Item::new("alpha")).unwrap_err();
        assert_eq!(
            err,
            StoreError::AlreadyExists {
                name: "alpha".into()
            }
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.resolve("alpha").unwrap().entry_id(),
            original.entry_id()
        );
    }

    #[test]
    fn resolve_unknown_key_is_not_found() {
        let catalog: Catalog<Item> = Catalog::new();
        let err = catalog.resolve("missing").unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                key: "missing".into()
            }
        );
    }

    #[test]
    fn uuid_shaped_key_falls_through_to_name_lookup() {
        let catalog = Catalog::new();
        // A name that is itself a valid UUID string.
        let uuid_name = Uuid::now_v7().to_string();
        catalog.insert(Item {
            id: Uuid::now_v7(),
            name: uuid_name.clone(),
        })
        .unwrap();
        // No entry has this *identifier*, so resolution falls back to the
        // name index and still finds it.
        let found = catalog.resolve(&uuid_name).unwrap();
        assert_eq!(found.entry_name(), uuid_name);
    }

    #[test]
    fn identifier_match_wins_over_same_spelled_name() {
        let catalog = Catalog::new();
        let first = catalog.insert(Item::new("first")).unwrap();
        // Second entry *named* with the first entry's identifier string.
        let shadowed_name = first.entry_id().to_string();
        catalog.insert(Item {
            id: Uuid::now_v7(),
            name: shadowed_name.clone(),
        })
        .unwrap();
        // The identifier match takes precedence: we get "first", not the
        // entry whose name is spelled the same. Documented quirk.
        let found = catalog.resolve(&shadowed_name).unwrap();
        assert_eq!(found.entry_name(), "first");
    }

    #[test]
    fn remove_by_name_then_both_addressings_fail() {
        let catalog = Catalog::new();
        let item = catalog.insert(Item::new("alpha")).unwrap();
        let id = item.entry_id().to_string();
        catalog.remove("alpha").unwrap();
        assert!(catalog.resolve("alpha").is_err());
        assert!(catalog.resolve(&id).is_err());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn remove_by_id_then_both_addressings_fail() {
        let catalog = Catalog::new();
        let item = catalog.insert(Item::new("alpha")).unwrap();
        let id = item.entry_id().to_string();
        catalog.remove(&id).unwrap();
        assert!(catalog.resolve(&id).is_err());
        assert!(catalog.resolve("alpha").is_err());
    }

    #[test]
    fn remove_unknown_key_is_not_found() {
        let catalog: Catalog<Item> = Catalog::new();
        assert!(matches!(
            catalog.remove("missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn name_is_reusable_after_remove() {
        let catalog = Catalog::new();
        let first = catalog.insert(Item::new("alpha")).unwrap();
        catalog.remove("alpha").unwrap();
        let second = catalog.insert(Item::new("alpha")).unwrap();
        assert_ne!(first.entry_id(), second.entry_id());
    }

    #[test]
    fn sorted_orders_by_name_ascending() {
        let catalog = Catalog::new();
        catalog.insert(Item::new("zeta")).unwrap();
        catalog.insert(Item::new("alpha")).unwrap();
        catalog.insert(Item::new("mid")).unwrap();
        let names: Vec<_> = catalog
            .sorted()
            .iter()
            .map(|e| e.entry_name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn replace_swaps_full_contents() {
        let catalog = Catalog::new();
        catalog.insert(Item::new("old")).unwrap();
        catalog.replace(vec![
            Arc::new(Item::new("new-a")),
            Arc::new(Item::new("new-b")),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("old").is_err());
        assert!(catalog.resolve("new-a").is_ok());
        assert!(catalog.resolve("new-b").is_ok());
    }
}
