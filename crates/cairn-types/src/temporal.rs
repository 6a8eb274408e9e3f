use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock access timestamps carried by every stack.
///
/// - `created_at` is set once and never changes.
/// - `updated_at` is refreshed by every mutating operation.
/// - `read_at` is refreshed by every operation, mutating or not.
///
/// Invariant: `read_at >= updated_at >= created_at`. The touch methods
/// preserve it by construction: a mutation refreshes both `updated_at` and
/// `read_at` to the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTimes {
    /// When the owning entry was created.
    pub created_at: DateTime<Utc>,
    /// When the owning entry was last mutated.
    pub updated_at: DateTime<Utc>,
    /// When the owning entry was last touched at all.
    pub read_at: DateTime<Utc>,
}

impl AccessTimes {
    /// All three timestamps set to the current instant.
    pub fn now() -> Self {
        let t = Utc::now();
        Self {
            created_at: t,
            updated_at: t,
            read_at: t,
        }
    }

    /// Rebuild from persisted values (e.g. when restoring a snapshot).
    pub fn from_parts(
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        read_at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_at,
            updated_at,
            read_at,
        }
    }

    /// Record a mutation: refreshes `updated_at` and `read_at` together.
    pub fn touch_update(&mut self) {
        let t = Utc::now();
        self.updated_at = t;
        self.read_at = t;
    }

    /// Record a read: refreshes `read_at` only.
    pub fn touch_read(&mut self) {
        self.read_at = Utc::now();
    }
}

impl Default for AccessTimes {
    fn default() -> Self {
        Self::now()
    }
}
