//! Embedding facade for Cairn.
//!
//! [`Engine`] is the entry point an embedding application holds: it owns
//! one [`cairn_store::Repository`] and its persistence configuration, and
//! runs the lifecycle around it: load the snapshot at open, hand out the
//! shared repository for request traffic, save the snapshot at shutdown.
//!
//! Tracing subscriber installation is the embedder's responsibility; this
//! crate only emits.

pub mod config;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};

// Re-export the store surface embedders operate on.
pub use cairn_store::{Database, Repository, Stack, StoreError, StoreResult};
