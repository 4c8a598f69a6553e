//! Nullable store — thread-safe in-memory ballot storage for testing.

use ballot_store::{BallotStore, StoreError};
use ballot_types::BallotId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// An in-memory ballot store for testing.
pub struct NullBallotStore {
    ballots: Mutex<HashMap<BallotId, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl NullBallotStore {
    pub fn new() -> Self {
        Self {
            ballots: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `put_ballot` fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn ballots(&self) -> Result<MutexGuard<'_, HashMap<BallotId, Vec<u8>>>, StoreError> {
        self.ballots
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".to_string()))
    }
}

impl Default for NullBallotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BallotStore for NullBallotStore {
    fn put_ballot(&self, id: &BallotId, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Backend("writes disabled".to_string()));
        }
        self.ballots()?.insert(*id, data.to_vec());
        Ok(())
    }

    fn get_ballot(&self, id: &BallotId) -> Result<Vec<u8>, StoreError> {
        self.ballots()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn exists(&self, id: &BallotId) -> Result<bool, StoreError> {
        Ok(self.ballots()?.contains_key(id))
    }

    fn delete_ballot(&self, id: &BallotId) -> Result<(), StoreError> {
        self.ballots()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn ballot_count(&self) -> Result<u64, StoreError> {
        Ok(self.ballots()?.len() as u64)
    }
}
