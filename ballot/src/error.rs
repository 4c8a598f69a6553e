use ballot_store::StoreError;
use ballot_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BallotError {
    #[error("only the chairperson can give the right to vote")]
    Unauthorized,

    #[error("the voter already voted")]
    AlreadyVoted,

    #[error("the voter already has the right to vote")]
    AlreadyEnfranchised,

    #[error("the account has no right to vote")]
    NoRight,

    #[error("self-delegation is disallowed")]
    SelfDelegation,

    #[error("found loop in delegation")]
    DelegationLoop,

    #[error("proposal {index} does not exist ({count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("a ballot needs at least one proposal")]
    NoProposals,

    #[error("invalid proposal name: {0}")]
    InvalidName(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot is inconsistent: {0}")]
    CorruptSnapshot(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("ballot lock poisoned")]
    Poisoned,
}
