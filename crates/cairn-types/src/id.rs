//! Opaque identifiers for databases and stacks.
//!
//! Both levels of the hierarchy use the same scheme: a time-ordered UUID v7
//! assigned once at creation and never reused. Identifiers are immutable;
//! the string rendering (via [`std::fmt::Display`]) is what external callers
//! send back when addressing an entry by id rather than by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for a database within a repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(uuid::Uuid);

impl DatabaseId {
    /// Generate a new time-ordered database ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID (e.g. when restoring a snapshot).
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for DatabaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatabaseId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

/// Unique identifier for a stack within a database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackId(uuid::Uuid);

impl StackId {
    /// Generate a new time-ordered stack ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID (e.g. when restoring a snapshot).
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for StackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StackId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = DatabaseId::new();
        let b = DatabaseId::new();
        assert_ne!(a, b);

        let x = StackId::new();
        let y = StackId::new();
        assert_ne!(x, y);
    }

    #[test]
    fn display_and_parse_roundtrip() {
        let id = DatabaseId::new();
        let parsed: DatabaseId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        let id = StackId::new();
        let parsed: StackId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_non_uuid_strings() {
        let err = "not-a-uuid".parse::<DatabaseId>().unwrap_err();
        assert_eq!(err, TypeError::InvalidId("not-a-uuid".into()));
        assert!("".parse::<StackId>().is_err());
    }

    #[test]
    fn from_uuid_preserves_value() {
        let raw = uuid::Uuid::now_v7();
        let id = StackId::from_uuid(raw);
        assert_eq!(*id.as_uuid(), raw);
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let id = DatabaseId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Transparent newtype: serializes as the bare UUID string.
        assert_eq!(json, format!("\"{id}\""));
        let parsed: DatabaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
