//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of a ballot (currently only storage) are abstracted
//! behind traits. This crate provides test-friendly implementations that
//! never touch the filesystem and can be inspected programmatically.

pub mod store;

pub use store::NullBallotStore;
