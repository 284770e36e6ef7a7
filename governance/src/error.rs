use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(String),

    #[error("proposal {0} already exists")]
    ProposalExists(String),

    #[error("proposal has expired")]
    Expired,

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("quorum not met: {have} of {need} approvals")]
    QuorumNotMet { have: u32, need: u32 },

    #[error("caller is not the governance admin")]
    Unauthorized,

    #[error("required approvals must be at least 1")]
    InvalidQuorum,
}
