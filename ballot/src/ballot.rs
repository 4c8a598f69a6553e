//! The ballot state machine.
//!
//! All mutating operations validate every precondition before touching
//! state, so a rejected call leaves the ballot exactly as it was.

use crate::config::BallotConfig;
use crate::error::BallotError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_types::{AccountAddress, ProposalName};
use std::collections::{HashMap, HashSet};

/// A single-chairperson ballot over a fixed list of proposals.
#[derive(Clone, Debug)]
pub struct Ballot {
    chairperson: AccountAddress,
    /// Registration order is the tie-break order.
    proposals: Vec<Proposal>,
    voters: HashMap<AccountAddress, Voter>,
    /// Units handed out by construction and `grant_right`.
    granted_units: u64,
    config: BallotConfig,
}

impl Ballot {
    /// Create a ballot with the default configuration.
    pub fn new(
        chairperson: AccountAddress,
        names: Vec<ProposalName>,
    ) -> Result<Self, BallotError> {
        Self::with_config(chairperson, names, BallotConfig::default())
    }

    /// Create a ballot. The chairperson receives one unit of weight.
    pub fn with_config(
        chairperson: AccountAddress,
        names: Vec<ProposalName>,
        config: BallotConfig,
    ) -> Result<Self, BallotError> {
        if names.is_empty() {
            return Err(BallotError::NoProposals);
        }
        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();
        let mut voters = HashMap::new();
        voters.insert(
            chairperson,
            Voter {
                weight: 1,
                ..Voter::default()
            },
        );
        tracing::info!(
            chairperson = %chairperson,
            proposals = proposals.len(),
            "ballot created"
        );
        Ok(Self {
            chairperson,
            proposals,
            voters,
            granted_units: 1,
            config,
        })
    }

    /// Create a ballot from plain strings, checking each name's length.
    pub fn from_strs(chairperson: AccountAddress, names: &[&str]) -> Result<Self, BallotError> {
        let names = names
            .iter()
            .map(|n| ProposalName::new(*n))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(chairperson, names)
    }

    /// Reassemble a ballot from stored parts. Used by the snapshot codec.
    pub(crate) fn from_parts(
        chairperson: AccountAddress,
        proposals: Vec<Proposal>,
        voters: HashMap<AccountAddress, Voter>,
        granted_units: u64,
        config: BallotConfig,
    ) -> Self {
        Self {
            chairperson,
            proposals,
            voters,
            granted_units,
            config,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Give `voter` the right to vote. Only the chairperson may call this.
    pub fn grant_right(
        &mut self,
        caller: &AccountAddress,
        voter: &AccountAddress,
    ) -> Result<(), BallotError> {
        if caller != &self.chairperson {
            tracing::debug!(caller = %caller, "grant rejected: not chairperson");
            return Err(BallotError::Unauthorized);
        }
        self.check_grantable(voter)?;
        self.voters.entry(*voter).or_default().weight = 1;
        self.granted_units += 1;
        tracing::info!(voter = %voter, "right to vote granted");
        Ok(())
    }

    /// Grant rights to several accounts at once. Either every account is
    /// enfranchised or none is; a repeated address counts as already
    /// enfranchised.
    pub fn grant_rights(
        &mut self,
        caller: &AccountAddress,
        voters: &[AccountAddress],
    ) -> Result<(), BallotError> {
        if caller != &self.chairperson {
            tracing::debug!(caller = %caller, "batch grant rejected: not chairperson");
            return Err(BallotError::Unauthorized);
        }
        let mut seen = HashSet::with_capacity(voters.len());
        for voter in voters {
            self.check_grantable(voter)?;
            if !seen.insert(*voter) {
                return Err(BallotError::AlreadyEnfranchised);
            }
        }
        for voter in voters {
            self.voters.entry(*voter).or_default().weight = 1;
        }
        self.granted_units += voters.len() as u64;
        tracing::info!(count = voters.len(), "rights to vote granted");
        Ok(())
    }

    fn check_grantable(&self, voter: &AccountAddress) -> Result<(), BallotError> {
        let record = self.voter(voter);
        if record.voted {
            tracing::debug!(voter = %voter, "grant rejected: already voted");
            return Err(BallotError::AlreadyVoted);
        }
        if record.is_enfranchised() {
            tracing::debug!(voter = %voter, "grant rejected: already enfranchised");
            return Err(BallotError::AlreadyEnfranchised);
        }
        Ok(())
    }

    /// Delegate `from`'s vote to `to`.
    ///
    /// The chain starting at `to` is followed to its end and the weight moves
    /// to that final account (or straight onto its proposal if it already
    /// voted). Returns the account the weight was delegated to.
    pub fn delegate(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
    ) -> Result<AccountAddress, BallotError> {
        let sender = self.voter(from);
        if !sender.is_enfranchised() {
            tracing::debug!(voter = %from, "delegation rejected: no right to vote");
            return Err(BallotError::NoRight);
        }
        if sender.voted {
            tracing::debug!(voter = %from, "delegation rejected: already voted");
            return Err(BallotError::AlreadyVoted);
        }
        if from == to {
            return Err(BallotError::SelfDelegation);
        }

        let target = self.resolve_delegate(to)?;
        if &target == from {
            tracing::debug!(voter = %from, to = %to, "delegation rejected: chain loops back");
            return Err(BallotError::DelegationLoop);
        }

        let weight = sender.weight;
        if let Some(record) = self.voters.get_mut(from) {
            record.voted = true;
            record.delegate = Some(target);
        }
        let receiver = self.voters.entry(target).or_default();
        match receiver.vote {
            // The receiver already voted: count the weight right away.
            Some(index) => self.proposals[index].vote_count += weight,
            None => receiver.weight += weight,
        }
        tracing::info!(voter = %from, target = %target, weight, "vote delegated");
        Ok(target)
    }

    /// Follow delegations from `start` until an account that has not
    /// delegated. Fails with `DelegationLoop` past the configured hop bound.
    pub fn resolve_delegate(&self, start: &AccountAddress) -> Result<AccountAddress, BallotError> {
        let bound = self.config.delegation_bound(self.voters.len());
        let mut current = *start;
        let mut hops = 0usize;
        while let Some(next) = self.voters.get(&current).and_then(|v| v.delegate) {
            if hops >= bound {
                tracing::debug!(start = %start, hops, "delegation chain exceeds bound");
                return Err(BallotError::DelegationLoop);
            }
            hops += 1;
            current = next;
        }
        tracing::debug!(start = %start, resolved = %current, hops, "delegation resolved");
        Ok(current)
    }

    /// Cast `voter`'s full weight for proposal `index`.
    pub fn vote(&mut self, voter: &AccountAddress, index: usize) -> Result<(), BallotError> {
        let record = self.voter(voter);
        if !record.is_enfranchised() {
            tracing::debug!(voter = %voter, "vote rejected: no right to vote");
            return Err(BallotError::NoRight);
        }
        if record.voted {
            tracing::debug!(voter = %voter, "vote rejected: already voted");
            return Err(BallotError::AlreadyVoted);
        }
        let count = self.proposals.len();
        if index >= count {
            tracing::debug!(voter = %voter, index, "vote rejected: no such proposal");
            return Err(BallotError::InvalidProposal { index, count });
        }

        if let Some(entry) = self.voters.get_mut(voter) {
            entry.voted = true;
            entry.vote = Some(index);
        }
        self.proposals[index].vote_count += record.weight;
        tracing::info!(voter = %voter, proposal = index, weight = record.weight, "vote cast");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Index of the proposal with the most weight. Ties go to the lowest
    /// index, so with no votes at all this is `0`.
    pub fn winning_proposal(&self) -> usize {
        let mut winner = 0;
        let mut best = 0u64;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > best {
                best = proposal.vote_count;
                winner = index;
            }
        }
        winner
    }

    pub fn winner_name(&self) -> &ProposalName {
        &self.proposals[self.winning_proposal()].name
    }

    pub fn chairperson(&self) -> &AccountAddress {
        &self.chairperson
    }

    pub fn proposal(&self, index: usize) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// The record for `address`; unknown accounts read as `Voter::default()`.
    pub fn voter(&self, address: &AccountAddress) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// All accounts with a non-default record.
    pub fn voters(&self) -> impl Iterator<Item = (&AccountAddress, &Voter)> {
        self.voters.iter()
    }

    pub fn config(&self) -> &BallotConfig {
        &self.config
    }

    /// Sum of all proposals' vote counts.
    pub fn total_votes_cast(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    /// Weight held by accounts that have not voted or delegated yet.
    pub fn pending_weight(&self) -> u64 {
        self.voters.values().map(Voter::pending_weight).sum()
    }

    /// Number of units ever granted, the chairperson's included.
    pub fn enfranchised_count(&self) -> u64 {
        self.granted_units
    }
}
