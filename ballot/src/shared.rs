//! Thread-safe handle that serialises access to one ballot.
//!
//! Every mutation holds the write lock for its whole transition, and every
//! query runs under a single read lock, so readers never see a half-applied
//! operation.

use crate::ballot::Ballot;
use crate::error::BallotError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_store::BallotStore;
use ballot_types::{AccountAddress, BallotId, ProposalName};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, shareable handle to a [`Ballot`].
#[derive(Clone, Debug)]
pub struct SharedBallot {
    inner: Arc<RwLock<Ballot>>,
}

impl SharedBallot {
    pub fn new(ballot: Ballot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ballot)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ballot>, BallotError> {
        self.inner.read().map_err(|_| BallotError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ballot>, BallotError> {
        self.inner.write().map_err(|_| BallotError::Poisoned)
    }

    pub fn grant_right(
        &self,
        caller: &AccountAddress,
        voter: &AccountAddress,
    ) -> Result<(), BallotError> {
        self.write()?.grant_right(caller, voter)
    }

    pub fn grant_rights(
        &self,
        caller: &AccountAddress,
        voters: &[AccountAddress],
    ) -> Result<(), BallotError> {
        self.write()?.grant_rights(caller, voters)
    }

    pub fn delegate(
        &self,
        from: &AccountAddress,
        to: &AccountAddress,
    ) -> Result<AccountAddress, BallotError> {
        self.write()?.delegate(from, to)
    }

    pub fn vote(&self, voter: &AccountAddress, index: usize) -> Result<(), BallotError> {
        self.write()?.vote(voter, index)
    }

    /// A consistent copy of the whole ballot.
    pub fn snapshot(&self) -> Result<Ballot, BallotError> {
        Ok(self.read()?.clone())
    }

    pub fn winning_proposal(&self) -> Result<usize, BallotError> {
        Ok(self.read()?.winning_proposal())
    }

    pub fn winner_name(&self) -> Result<ProposalName, BallotError> {
        Ok(self.read()?.winner_name().clone())
    }

    pub fn proposal(&self, index: usize) -> Result<Option<Proposal>, BallotError> {
        Ok(self.read()?.proposal(index).cloned())
    }

    pub fn voter(&self, address: &AccountAddress) -> Result<Voter, BallotError> {
        Ok(self.read()?.voter(address))
    }

    /// Persist the current state under a read lock, so the stored bytes
    /// always reflect a whole number of operations.
    pub fn persist<S: BallotStore + ?Sized>(
        &self,
        store: &S,
        id: &BallotId,
    ) -> Result<(), BallotError> {
        self.read()?.persist(store, id)
    }

    /// Unwrap the ballot if this is the last handle.
    pub fn into_inner(self) -> Result<Ballot, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock.into_inner().map_err(|poisoned| Self::new(poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}
