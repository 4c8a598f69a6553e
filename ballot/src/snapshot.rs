//! Ballot persistence: a serializable snapshot and its `bincode` codec.

use crate::ballot::Ballot;
use crate::config::BallotConfig;
use crate::error::BallotError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_store::BallotStore;
use ballot_types::{AccountAddress, BallotId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable copy of a ballot's full state.
///
/// Voters are sorted by address so equal ballots encode to equal bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub chairperson: AccountAddress,
    pub proposals: Vec<Proposal>,
    pub voters: Vec<(AccountAddress, Voter)>,
    pub granted_units: u64,
    pub config: BallotConfig,
}

impl BallotSnapshot {
    pub fn capture(ballot: &Ballot) -> Self {
        let mut voters: Vec<(AccountAddress, Voter)> =
            ballot.voters().map(|(a, v)| (*a, *v)).collect();
        voters.sort_by_key(|(address, _)| *address);
        Self {
            chairperson: *ballot.chairperson(),
            proposals: ballot.proposals().to_vec(),
            voters,
            granted_units: ballot.enfranchised_count(),
            config: ballot.config().clone(),
        }
    }

    /// Rebuild a ballot, checking that the snapshot is internally consistent.
    pub fn restore(self) -> Result<Ballot, BallotError> {
        if self.proposals.is_empty() {
            return Err(corrupt("no proposals".to_string()));
        }
        let count = self.proposals.len();
        let mut voters = HashMap::with_capacity(self.voters.len());
        for (address, voter) in self.voters {
            if let Some(index) = voter.vote {
                if index >= count || !voter.voted {
                    return Err(corrupt(format!("voter {address} has an invalid vote record")));
                }
            }
            if voter.voted == (voter.vote.is_none() && voter.delegate.is_none()) {
                return Err(corrupt(format!(
                    "voter {address} is neither undecided, voting nor delegating"
                )));
            }
            if voter.vote.is_some() && voter.delegate.is_some() {
                return Err(corrupt(format!("voter {address} both voted and delegated")));
            }
            if voters.insert(address, voter).is_some() {
                return Err(corrupt(format!("voter {address} appears twice")));
            }
        }

        // Every granted unit went to its own account.
        let records = voters.len() as u64;
        if self.granted_units > records {
            return Err(corrupt(format!(
                "{} units granted to {records} accounts",
                self.granted_units
            )));
        }
        let cast = self
            .proposals
            .iter()
            .try_fold(0u64, |sum, p| sum.checked_add(p.vote_count));
        let pending = voters
            .values()
            .try_fold(0u64, |sum, v| sum.checked_add(v.pending_weight()));
        let accounted = cast
            .zip(pending)
            .and_then(|(cast, pending)| cast.checked_add(pending))
            .ok_or_else(|| corrupt("weight overflow".to_string()))?;
        if accounted != self.granted_units {
            return Err(corrupt(format!(
                "{accounted} units accounted for, {} granted",
                self.granted_units
            )));
        }
        check_delegations(&voters)?;

        Ok(Ballot::from_parts(
            self.chairperson,
            self.proposals,
            voters,
            self.granted_units,
            self.config,
        ))
    }
}

fn corrupt(reason: String) -> BallotError {
    BallotError::CorruptSnapshot(reason)
}

/// Stored delegates must name known accounts, and following them must end.
fn check_delegations(voters: &HashMap<AccountAddress, Voter>) -> Result<(), BallotError> {
    for (address, voter) in voters {
        let mut current = voter.delegate;
        let mut hops = 0usize;
        while let Some(next) = current {
            let record = voters.get(&next).ok_or_else(|| {
                corrupt(format!("voter {address} delegates to unknown account {next}"))
            })?;
            hops += 1;
            if hops > voters.len() {
                return Err(corrupt(format!("delegation from {address} never ends")));
            }
            current = record.delegate;
        }
    }
    Ok(())
}

impl Ballot {
    /// Encode the ballot for storage.
    pub fn save_state(&self) -> Result<Vec<u8>, BallotError> {
        bincode::serialize(&BallotSnapshot::capture(self))
            .map_err(|e| BallotError::Serialization(e.to_string()))
    }

    /// Decode a ballot produced by [`Ballot::save_state`].
    pub fn load_state(data: &[u8]) -> Result<Self, BallotError> {
        let snapshot: BallotSnapshot = bincode::deserialize(data)
            .map_err(|e| BallotError::Serialization(e.to_string()))?;
        snapshot.restore()
    }

    /// Write the encoded ballot to `store` under `id`.
    pub fn persist<S: BallotStore + ?Sized>(
        &self,
        store: &S,
        id: &BallotId,
    ) -> Result<(), BallotError> {
        let bytes = self.save_state()?;
        store.put_ballot(id, &bytes)?;
        tracing::debug!(ballot = %id, bytes = bytes.len(), "ballot persisted");
        Ok(())
    }

    /// Load the ballot stored under `id`.
    pub fn restore<S: BallotStore + ?Sized>(store: &S, id: &BallotId) -> Result<Self, BallotError> {
        let bytes = store.get_ballot(id)?;
        Self::load_state(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_nullables::NullBallotStore;
    use ballot_store::StoreError;

    fn account(seed: u8) -> AccountAddress {
        AccountAddress::new([seed; 20])
    }

    fn sample() -> Ballot {
        let mut b = Ballot::from_strs(account(0), &["A", "B", "C"]).unwrap();
        b.grant_rights(&account(0), &[account(1), account(2), account(3)])
            .unwrap();
        b.vote(&account(1), 2).unwrap();
        b.delegate(&account(2), &account(3)).unwrap();
        b
    }

    #[test]
    fn test_state_survives_encoding() {
        let b = sample();
        let restored = Ballot::load_state(&b.save_state().unwrap()).unwrap();
        assert_eq!(BallotSnapshot::capture(&restored), BallotSnapshot::capture(&b));
        assert_eq!(restored.voter(&account(3)).weight, 2);
        assert_eq!(restored.winning_proposal(), 2);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let b = sample();
        assert_eq!(b.save_state().unwrap(), b.clone().save_state().unwrap());
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        assert!(matches!(
            Ballot::load_state(&[1, 2, 3]),
            Err(BallotError::Serialization(_))
        ));
    }

    #[test]
    fn test_unbalanced_snapshot_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        snapshot.proposals[0].vote_count += 5;
        assert!(matches!(
            snapshot.restore(),
            Err(BallotError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_out_of_range_vote_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        let entry = snapshot
            .voters
            .iter_mut()
            .find(|(a, _)| *a == account(1))
            .unwrap();
        entry.1.vote = Some(7);
        assert!(matches!(
            snapshot.restore(),
            Err(BallotError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_overflowing_counts_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        snapshot.proposals[0].vote_count = u64::MAX;
        snapshot.proposals[1].vote_count = 2;
        assert!(matches!(
            snapshot.restore(),
            Err(BallotError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_more_units_than_accounts_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        // Balanced, but four records cannot hold u64::MAX granted units.
        let extra = u64::MAX - snapshot.granted_units;
        snapshot.granted_units = u64::MAX;
        snapshot.proposals[0].vote_count += extra;
        match snapshot.restore() {
            Err(BallotError::CorruptSnapshot(reason)) => {
                assert!(reason.contains("granted to 4 accounts"), "{reason}")
            }
            other => panic!("expected a corrupt snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_vote_and_delegate_together_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        let entry = snapshot
            .voters
            .iter_mut()
            .find(|(a, _)| *a == account(2))
            .unwrap();
        entry.1.vote = Some(0);
        assert!(matches!(
            snapshot.restore(),
            Err(BallotError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_delegate_to_unknown_account_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        let entry = snapshot
            .voters
            .iter_mut()
            .find(|(a, _)| *a == account(2))
            .unwrap();
        entry.1.delegate = Some(account(9));
        assert!(matches!(
            snapshot.restore(),
            Err(BallotError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_delegation_cycle_rejected() {
        let mut snapshot = BallotSnapshot::capture(&sample());
        // 2 -> 3 already; close the loop with 3 -> 2 and keep the totals balanced.
        let entry = snapshot
            .voters
            .iter_mut()
            .find(|(a, _)| *a == account(3))
            .unwrap();
        entry.1.voted = true;
        entry.1.delegate = Some(account(2));
        snapshot.proposals[0].vote_count += 2;
        match snapshot.restore() {
            Err(BallotError::CorruptSnapshot(reason)) => {
                assert!(reason.contains("never ends"), "{reason}")
            }
            other => panic!("expected a corrupt snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_delegation_chain_survives_encoding() {
        let mut b = sample();
        // 2 -> 3 is stored; 3 then delegates on to 1, who already voted.
        b.delegate(&account(3), &account(1)).unwrap();
        assert_eq!(b.voter(&account(2)).delegate, Some(account(3)));
        let restored = Ballot::load_state(&b.save_state().unwrap()).unwrap();
        assert_eq!(restored.proposal(2).unwrap().vote_count, 3);
        assert_eq!(restored.resolve_delegate(&account(2)).unwrap(), account(1));
    }

    #[test]
    fn test_restored_ballot_keeps_granting() {
        let mut restored = Ballot::load_state(&sample().save_state().unwrap()).unwrap();
        restored.grant_right(&account(0), &account(5)).unwrap();
        assert_eq!(restored.enfranchised_count(), 5);
    }

    #[test]
    fn test_persist_and_restore() {
        let store = NullBallotStore::new();
        let b = sample();
        let names: Vec<_> = b.proposals().iter().map(|p| p.name.clone()).collect();
        let id = BallotId::derive(b.chairperson(), &names, 0);
        b.persist(&store, &id).unwrap();
        let restored = Ballot::restore(&store, &id).unwrap();
        assert_eq!(restored.winner_name(), "C");
    }

    #[test]
    fn test_restore_missing_ballot() {
        let store = NullBallotStore::new();
        assert!(matches!(
            Ballot::restore(&store, &BallotId::ZERO),
            Err(BallotError::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn test_persist_write_failure() {
        let store = NullBallotStore::new();
        store.fail_writes(true);
        assert!(matches!(
            sample().persist(&store, &BallotId::ZERO),
            Err(BallotError::Store(StoreError::Backend(_)))
        ));
    }
}
