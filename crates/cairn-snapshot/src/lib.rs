//! Whole-repository binary persistence for Cairn.
//!
//! A snapshot is a complete, consistent serialization of a repository and
//! everything it transitively owns: every database and stack, with
//! identifiers, timestamps, and element data. Persistence is wholesale:
//! the full graph is captured at save time and fully replaces the
//! in-memory contents at load time. There is no incremental persistence.
//!
//! # Contract
//!
//! - [`RepositorySnapshot::capture`] — walk the live graph into plain
//!   records under the repository's read lock.
//! - [`RepositorySnapshot::write_to`] — framed binary file (magic, format
//!   version, CRC32, bincode payload), written via temp file + atomic
//!   rename.
//! - [`RepositorySnapshot::read_from`] — absent file is a valid initial
//!   state (`None`), a corrupt file is an error.
//! - [`RepositorySnapshot::restore`] — rebuild the graph with persisted
//!   identifiers and timestamps verbatim and swap it in.
//!
//! Element values round-trip without type loss for every JSON-representable
//! type.

pub mod codec;
pub mod error;
pub mod persist;
pub mod record;

pub use error::{SnapshotError, SnapshotResult};
pub use persist::Persist;
pub use record::{DatabaseRecord, RepositorySnapshot, StackRecord};
