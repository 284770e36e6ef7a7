//! Multi-party governance for the AgriCarbon core.
//!
//! Privileged operations — minting credits, pausing the ledger, freezing an
//! account — go through a proposal/vote/execute workflow. A proposal starts
//! with the creator's implicit vote, collects further approvals for up to
//! seven days, and executes once the approval count reaches the configured
//! quorum. Executing a mint proposal yields the [`agc_ledger::MintAuthorization`]
//! capability the ledger requires.
//!
//! Vote counting is additive per call: the engine does not deduplicate
//! voter identities. The substrate that authenticates callers decides
//! whether one identity may vote more than once.

pub mod engine;
pub mod error;
pub mod proposal;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalAction, ProposalEffect};
