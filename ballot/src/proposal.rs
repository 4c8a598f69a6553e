//! Ballot proposals.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

/// A proposal and the weight accumulated for it so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Fixed at construction.
    pub name: ProposalName,
    /// Direct votes plus delegated weight.
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(name: ProposalName) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}
