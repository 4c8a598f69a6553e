//! Per-account voter records.

use ballot_types::AccountAddress;
use serde::{Deserialize, Serialize};

/// The state of one account in a ballot.
///
/// Every account starts from `Voter::default()`: no weight, not voted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Units of weight this account controls. Zero means "not enfranchised".
    pub weight: u64,
    /// Set once the account voted or delegated. Never reset.
    pub voted: bool,
    /// Resolved delegation target, only when the account delegated.
    pub delegate: Option<AccountAddress>,
    /// Proposal index, only when the account voted directly.
    pub vote: Option<usize>,
}

impl Voter {
    pub fn is_enfranchised(&self) -> bool {
        self.weight > 0
    }

    pub fn has_delegated(&self) -> bool {
        self.delegate.is_some()
    }

    /// Weight that is still waiting to be counted.
    pub fn pending_weight(&self) -> u64 {
        if self.voted {
            0
        } else {
            self.weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voter_is_disenfranchised() {
        let voter = Voter::default();
        assert!(!voter.is_enfranchised());
        assert!(!voter.voted);
        assert!(!voter.has_delegated());
        assert_eq!(voter.vote, None);
    }

    #[test]
    fn voted_weight_is_not_pending() {
        let voter = Voter {
            weight: 3,
            voted: true,
            delegate: None,
            vote: Some(0),
        };
        assert_eq!(voter.pending_weight(), 0);
    }
}
