//! The Cairn hierarchy core.
//!
//! An in-memory, concurrency-safe, three-level store:
//! [`Repository`] → [`Database`] → [`Stack`], where each stack is a LIFO
//! sequence of arbitrary JSON values.
//!
//! # Addressing
//!
//! Both parent→child levels use the same dual scheme: a child is addressed
//! either by its opaque unique identifier (UUID) or by its human-assigned
//! name. The shared [`Catalog`] type implements the scheme once for both
//! levels.
//!
//! # Locking
//!
//! Every level owns an independent `RwLock` guarding exactly its own direct
//! state. Children are handed out as `Arc`, and no lock is ever held across
//! a call into another level: resolving a database releases the
//! repository's lock before the database's lock can be taken, and so on
//! down. Operations on different stacks never contend.
//!
//! # Failure modes
//!
//! Exactly two: [`StoreError::NotFound`] and [`StoreError::AlreadyExists`].
//! Stack operations never fail; popping or peeking an empty stack yields
//! `None`, a normal outcome.

pub mod catalog;
pub mod database;
pub mod error;
pub mod repository;
pub mod stack;

pub use catalog::{Catalog, CatalogEntry};
pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use repository::Repository;
pub use stack::Stack;
