//! LIFO stack of JSON values with access timestamps.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use cairn_types::{AccessTimes, StackId};

use crate::catalog::CatalogEntry;

/// An ordered collection of JSON values with LIFO semantics.
///
/// The element sequence reflects push order; the top is the most recently
/// pushed element not yet popped. Elements are caller-owned opaque values;
/// the stack never inspects or mutates them: push stores what it is given,
/// pop and peek return it verbatim.
///
/// All mutable state (elements and the updated/read timestamps) lives behind
/// one `RwLock` owned by the stack itself, independent of the owning
/// database's lock. Operations on different stacks never contend. No stack
/// operation fails: the API is deliberately `Result`-free and there is no
/// capacity bound.
pub struct Stack {
    id: StackId,
    name: String,
    state: RwLock<StackState>,
}

struct StackState {
    elements: Vec<Value>,
    times: AccessTimes,
}

impl Stack {
    /// Create an empty stack with a fresh identifier and all three
    /// timestamps set to the current instant.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: StackId::new(),
            name: name.into(),
            state: RwLock::new(StackState {
                elements: Vec::new(),
                times: AccessTimes::now(),
            }),
        }
    }

    /// Rebuild a stack from persisted state. Identifier, timestamps, and
    /// element order are taken verbatim; nothing is regenerated.
    pub fn restore(
        id: StackId,
        name: impl Into<String>,
        times: AccessTimes,
        elements: Vec<Value>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            state: RwLock::new(StackState { elements, times }),
        }
    }

    /// The stack's unique identifier.
    pub fn id(&self) -> StackId {
        self.id
    }

    /// The stack's name, unique within its database.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the stack was created. Immutable.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.state.read().expect("lock poisoned").times.created_at
    }

    /// When the stack was last mutated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.state.read().expect("lock poisoned").times.updated_at
    }

    /// When the stack was last touched by any operation.
    pub fn read_at(&self) -> DateTime<Utc> {
        self.state.read().expect("lock poisoned").times.read_at
    }

    /// All three timestamps as one value.
    pub fn times(&self) -> AccessTimes {
        self.state.read().expect("lock poisoned").times
    }

    /// Append an element as the new top. Refreshes `updated_at` and
    /// `read_at`.
    pub fn push(&self, element: Value) {
        let mut state = self.state.write().expect("lock poisoned");
        state.times.touch_update();
        state.elements.push(element);
    }

    /// Remove and return the top element. Returns `None` on an empty stack (a
    /// normal outcome, not an error) and still refreshes
    /// `read_at`; a successful pop refreshes `updated_at` and `read_at`.
    pub fn pop(&self) -> Option<Value> {
        let mut state = self.state.write().expect("lock poisoned");
        if state.elements.is_empty() {
            state.times.touch_read();
            return None;
        }
        state.times.touch_update();
        state.elements.pop()
    }

    /// Return a copy of the top element without removing it. Refreshes
    /// `read_at` only; `None` on an empty stack.
    ///
    /// Takes the write lock: refreshing `read_at` is interior mutation even
    /// though the element sequence is untouched.
    pub fn peek(&self) -> Option<Value> {
        let mut state = self.state.write().expect("lock poisoned");
        state.times.touch_read();
        state.elements.last().cloned()
    }

    /// Current element count. Does not affect any timestamp.
    pub fn size(&self) -> usize {
        self.state.read().expect("lock poisoned").elements.len()
    }

    /// Returns `true` if the stack holds no elements. Does not affect any
    /// timestamp.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").elements.is_empty()
    }

    /// Discard all elements. Refreshes `updated_at` and `read_at`.
    pub fn flush(&self) {
        let mut state = self.state.write().expect("lock poisoned");
        state.times.touch_update();
        state.elements.clear();
    }

    /// Timestamps and a copy of the full element sequence (push order,
    /// bottom first), read under a single lock acquisition. Used for
    /// snapshot capture; does not affect any timestamp.
    pub fn snapshot_state(&self) -> (AccessTimes, Vec<Value>) {
        let state = self.state.read().expect("lock poisoned");
        (state.times, state.elements.clone())
    }
}

impl CatalogEntry for Stack {
    fn entry_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn entry_name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}
