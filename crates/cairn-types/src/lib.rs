//! Foundation types for Cairn.
//!
//! This crate provides the identifier and temporal types used throughout the
//! Cairn stack store. Every other Cairn crate depends on `cairn-types`.
//!
//! # Key Types
//!
//! - [`DatabaseId`] — Unique, time-ordered database identifier (UUID v7)
//! - [`StackId`] — Unique, time-ordered stack identifier (UUID v7)
//! - [`AccessTimes`] — Created/updated/read wall-clock timestamps
//! - [`TypeError`] — Identifier parsing failures

pub mod error;
pub mod id;
pub mod temporal;

pub use error::TypeError;
pub use id::{DatabaseId, StackId};
pub use temporal::AccessTimes;
