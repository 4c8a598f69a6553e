//! Ballot identifiers.

use crate::{AccountAddress, ProposalName};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte identifier for one ballot instance. Used as the storage key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BallotId([u8; 32]);

impl BallotId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive an id from the construction arguments.
    ///
    /// Blake2b-256 over the chairperson, each name's 32-byte encoding in order,
    /// and the little-endian `nonce`. Two ballots with the same chairperson and
    /// names need distinct nonces.
    pub fn derive(chairperson: &AccountAddress, names: &[ProposalName], nonce: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(chairperson.as_bytes());
        for name in names {
            hasher.update(name.to_bytes32());
        }
        hasher.update(nonce.to_le_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BallotId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
