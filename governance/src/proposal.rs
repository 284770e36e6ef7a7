//! Governance proposals and the actions they carry.

use agc_ledger::MintAuthorization;
use agc_types::{AccountAddress, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// What a governance proposal does when executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Mint credits into an account.
    MintCredits {
        recipient: AccountAddress,
        amount: u128,
    },
    /// Halt or resume ledger operations.
    SetPaused(bool),
    /// Freeze or unfreeze an account's outgoing transfers.
    SetFrozen {
        account: AccountAddress,
        frozen: bool,
    },
    /// Change the approval quorum for future proposals.
    SetRequiredApprovals(u32),
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub creator: AccountAddress,
    pub action: ProposalAction,
    /// Approval count. Starts at 1 — the creator's implicit vote.
    pub vote_count: u32,
    pub executed: bool,
    pub created_at: Timestamp,
    /// Voting and execution must happen strictly before this time.
    pub expires_at: Timestamp,
}

impl Proposal {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// The outcome of executing a proposal.
///
/// A mint carries the single-use ledger capability; the administrative
/// directives are applied by the substrate through the ledger's admin
/// entry points. `RequiredApprovalsChanged` has already been applied to
/// the engine itself and is reported for the caller's records.
#[derive(Debug)]
pub enum ProposalEffect {
    Mint {
        recipient: AccountAddress,
        amount: u128,
        authorization: MintAuthorization,
    },
    SetPaused(bool),
    SetFrozen {
        account: AccountAddress,
        frozen: bool,
    },
    RequiredApprovalsChanged(u32),
}
