//! Ballot storage trait.

use crate::StoreError;
use ballot_types::BallotId;

/// Trait for storing encoded ballot snapshots keyed by [`BallotId`].
///
/// Values are opaque bytes; encoding belongs to the ballot core.
pub trait BallotStore {
    /// Store (or overwrite) a ballot snapshot.
    fn put_ballot(&self, id: &BallotId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a ballot snapshot. Fails with [`StoreError::NotFound`] when absent.
    fn get_ballot(&self, id: &BallotId) -> Result<Vec<u8>, StoreError>;

    fn exists(&self, id: &BallotId) -> Result<bool, StoreError>;

    fn delete_ballot(&self, id: &BallotId) -> Result<(), StoreError>;

    /// Number of stored ballots.
    fn ballot_count(&self) -> Result<u64, StoreError>;
}
