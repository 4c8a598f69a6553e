//! Abstract storage traits for ballots.
//!
//! The ballot core never performs I/O. Callers that keep ballots between
//! calls implement [`BallotStore`] for their backend (an in-memory one for
//! tests lives in `ballot-nullables`).

pub mod ballot;
pub mod error;

pub use ballot::BallotStore;
pub use error::StoreError;
