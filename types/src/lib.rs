//! Fundamental types for the ballot.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, fixed-width proposal names and ballot identifiers.

pub mod address;
pub mod error;
pub mod hash;
pub mod name;

pub use address::AccountAddress;
pub use error::TypesError;
pub use hash::BallotId;
pub use name::ProposalName;
