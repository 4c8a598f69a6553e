//! Single-chairperson ballot.
//!
//! A fixed list of proposals is registered at construction. The chairperson
//! grants voting rights; each enfranchised account either votes for one
//! proposal or delegates its weight to another account. Delegation chains are
//! resolved eagerly, so weight always sits either on a voter that has not yet
//! voted or on a proposal's tally, never on both.
//!
//! Key principle: one granted unit per account. Delegation moves weight, it
//! never creates it.

pub mod ballot;
pub mod config;
pub mod error;
pub mod proposal;
pub mod shared;
pub mod snapshot;
pub mod voter;

pub use ballot::Ballot;
pub use config::BallotConfig;
pub use error::BallotError;
pub use proposal::Proposal;
pub use shared::SharedBallot;
pub use snapshot::BallotSnapshot;
pub use voter::Voter;

pub use ballot_types::{AccountAddress, BallotId, ProposalName};
