//! Core governance engine — proposal lifecycle from creation to execution.

use std::collections::HashMap;

use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalAction, ProposalEffect};
use agc_ledger::MintAuthorization;
use agc_types::{AccountAddress, ProposalId, ProtocolParams, Timestamp};

/// Seconds a proposal stays open before it expires unexecuted.
pub const PROPOSAL_LIFETIME_SECS: u64 = 7 * 24 * 3600;

/// The governance engine.
///
/// Holds every proposal and the approval quorum. Expiry is evaluated
/// against the `now` parameter each operation receives — an expired
/// proposal stays in the map and simply rejects further votes/execution.
pub struct GovernanceEngine {
    admin: AccountAddress,
    proposals: HashMap<ProposalId, Proposal>,
    required_approvals: u32,
    proposal_lifetime_secs: u64,
}

impl GovernanceEngine {
    pub fn new(admin: AccountAddress, required_approvals: u32) -> Self {
        Self {
            admin,
            proposals: HashMap::new(),
            required_approvals,
            proposal_lifetime_secs: PROPOSAL_LIFETIME_SECS,
        }
    }

    /// Override the proposal lifetime.
    pub fn with_lifetime(mut self, lifetime_secs: u64) -> Self {
        self.proposal_lifetime_secs = lifetime_secs;
        self
    }

    /// Engine configured from protocol parameters.
    pub fn from_params(admin: AccountAddress, params: &ProtocolParams) -> Self {
        Self::new(admin, params.required_approvals).with_lifetime(params.proposal_lifetime_secs)
    }

    /// Create a proposal. The creator's vote is counted implicitly.
    pub fn propose(
        &mut self,
        id: ProposalId,
        creator: AccountAddress,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::ProposalExists(id.to_string()));
        }
        tracing::info!(proposal = %id, creator = %creator, "proposal created");
        self.proposals.insert(
            id.clone(),
            Proposal {
                id,
                creator,
                action,
                vote_count: 1,
                executed: false,
                created_at: now,
                expires_at: now.plus_secs(self.proposal_lifetime_secs),
            },
        );
        Ok(())
    }

    /// Record a vote. An approval increments the count by one; a rejection
    /// changes nothing. Counting is additive per call — identities are not
    /// deduplicated at this layer.
    pub fn vote(
        &mut self,
        id: &ProposalId,
        approve: bool,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if proposal.is_expired(now) {
            return Err(GovernanceError::Expired);
        }
        if approve {
            proposal.vote_count += 1;
            tracing::debug!(proposal = %id, votes = proposal.vote_count, "approval recorded");
        }
        Ok(())
    }

    /// Execute a proposal whose approval count has reached the quorum.
    ///
    /// Marks the proposal executed and returns its effect; a mint effect
    /// carries the single-use [`MintAuthorization`] for the ledger.
    pub fn execute(
        &mut self,
        id: &ProposalId,
        now: Timestamp,
    ) -> Result<ProposalEffect, GovernanceError> {
        let required = self.required_approvals;
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if proposal.is_expired(now) {
            return Err(GovernanceError::Expired);
        }
        if proposal.vote_count < required {
            return Err(GovernanceError::QuorumNotMet {
                have: proposal.vote_count,
                need: required,
            });
        }

        proposal.executed = true;
        tracing::info!(proposal = %id, votes = proposal.vote_count, "proposal executed");
        let effect = match proposal.action.clone() {
            ProposalAction::MintCredits { recipient, amount } => ProposalEffect::Mint {
                recipient,
                amount,
                authorization: MintAuthorization::governance(id.clone()),
            },
            ProposalAction::SetPaused(paused) => ProposalEffect::SetPaused(paused),
            ProposalAction::SetFrozen { account, frozen } => {
                ProposalEffect::SetFrozen { account, frozen }
            }
            ProposalAction::SetRequiredApprovals(n) => {
                self.required_approvals = n;
                ProposalEffect::RequiredApprovalsChanged(n)
            }
        };
        Ok(effect)
    }

    /// Change the approval quorum directly. Admin only.
    pub fn set_required_approvals(
        &mut self,
        caller: &AccountAddress,
        n: u32,
    ) -> Result<(), GovernanceError> {
        if caller != &self.admin {
            return Err(GovernanceError::Unauthorized);
        }
        if n == 0 {
            return Err(GovernanceError::InvalidQuorum);
        }
        self.required_approvals = n;
        Ok(())
    }

    pub fn required_approvals(&self) -> u32 {
        self.required_approvals
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("agc_{n:0>40}"))
    }

    fn pid(s: &str) -> ProposalId {
        ProposalId::new(s)
    }

    fn mint_action() -> ProposalAction {
        ProposalAction::MintCredits {
            recipient: addr(5),
            amount: 1_000,
        }
    }

    fn engine_with_mint_proposal(required: u32) -> GovernanceEngine {
        let mut engine = GovernanceEngine::new(addr(0), required);
        engine
            .propose(pid("p1"), addr(1), mint_action(), Timestamp::new(1000))
            .unwrap();
        engine
    }

    #[test]
    fn from_params_sets_quorum_and_lifetime() {
        let params = ProtocolParams::agc_defaults();
        let mut engine = GovernanceEngine::from_params(addr(0), &params);
        assert_eq!(engine.required_approvals(), params.required_approvals);
        engine
            .propose(pid("p"), addr(1), mint_action(), Timestamp::new(0))
            .unwrap();
        assert_eq!(
            engine.proposal(&pid("p")).unwrap().expires_at,
            Timestamp::new(params.proposal_lifetime_secs)
        );
    }

    #[test]
    fn creator_vote_is_implicit() {
        let engine = engine_with_mint_proposal(3);
        assert_eq!(engine.proposal(&pid("p1")).unwrap().vote_count, 1);
    }

    #[test]
    fn quorum_scenario_from_three_approvals() {
        let mut engine = engine_with_mint_proposal(3);
        let now = Timestamp::new(2000);

        // One implicit vote is not enough.
        let result = engine.execute(&pid("p1"), now);
        assert_eq!(result.unwrap_err(), GovernanceError::QuorumNotMet { have: 1, need: 3 });

        engine.vote(&pid("p1"), true, now).unwrap();
        engine.vote(&pid("p1"), true, now).unwrap();
        let effect = engine.execute(&pid("p1"), now).unwrap();
        match effect {
            ProposalEffect::Mint { recipient, amount, .. } => {
                assert_eq!(recipient, addr(5));
                assert_eq!(amount, 1_000);
            }
            other => panic!("expected mint effect, got {other:?}"),
        }
        assert!(engine.proposal(&pid("p1")).unwrap().executed);
    }

    #[test]
    fn rejection_votes_do_not_count() {
        let mut engine = engine_with_mint_proposal(3);
        let now = Timestamp::new(2000);
        engine.vote(&pid("p1"), false, now).unwrap();
        assert_eq!(engine.proposal(&pid("p1")).unwrap().vote_count, 1);
    }

    #[test]
    fn vote_counting_is_additive_per_call() {
        // The engine does not deduplicate identities: two approvals from
        // the same caller both count. The authenticating substrate decides
        // whether to permit that.
        let mut engine = engine_with_mint_proposal(3);
        let now = Timestamp::new(2000);
        engine.vote(&pid("p1"), true, now).unwrap();
        engine.vote(&pid("p1"), true, now).unwrap();
        assert_eq!(engine.proposal(&pid("p1")).unwrap().vote_count, 3);
        assert!(engine.execute(&pid("p1"), now).is_ok());
    }

    #[test]
    fn expired_proposal_rejects_votes_and_execution() {
        let mut engine = engine_with_mint_proposal(1);
        let past_expiry = Timestamp::new(1000 + PROPOSAL_LIFETIME_SECS);

        assert_eq!(
            engine.vote(&pid("p1"), true, past_expiry),
            Err(GovernanceError::Expired)
        );
        assert_eq!(
            engine.execute(&pid("p1"), past_expiry).unwrap_err(),
            GovernanceError::Expired
        );
        // One second before expiry both still work.
        let just_before = Timestamp::new(999 + PROPOSAL_LIFETIME_SECS);
        assert!(engine.execute(&pid("p1"), just_before).is_ok());
    }

    #[test]
    fn double_execution_rejected() {
        let mut engine = engine_with_mint_proposal(1);
        let now = Timestamp::new(2000);
        engine.execute(&pid("p1"), now).unwrap();
        assert_eq!(
            engine.execute(&pid("p1"), now).unwrap_err(),
            GovernanceError::AlreadyExecuted
        );
        assert_eq!(
            engine.vote(&pid("p1"), true, now),
            Err(GovernanceError::AlreadyExecuted)
        );
    }

    #[test]
    fn duplicate_proposal_id_rejected() {
        let mut engine = engine_with_mint_proposal(3);
        let result = engine.propose(pid("p1"), addr(2), mint_action(), Timestamp::new(5000));
        assert_eq!(
            result,
            Err(GovernanceError::ProposalExists("p1".to_string()))
        );
    }

    #[test]
    fn set_required_approvals_is_admin_only() {
        let mut engine = GovernanceEngine::new(addr(0), 3);
        assert_eq!(
            engine.set_required_approvals(&addr(1), 5),
            Err(GovernanceError::Unauthorized)
        );
        engine.set_required_approvals(&addr(0), 5).unwrap();
        assert_eq!(engine.required_approvals(), 5);
        assert_eq!(
            engine.set_required_approvals(&addr(0), 0),
            Err(GovernanceError::InvalidQuorum)
        );
    }

    #[test]
    fn quorum_change_proposal_applies_to_engine() {
        let mut engine = GovernanceEngine::new(addr(0), 1);
        engine
            .propose(
                pid("quorum"),
                addr(1),
                ProposalAction::SetRequiredApprovals(2),
                Timestamp::new(0),
            )
            .unwrap();
        let effect = engine.execute(&pid("quorum"), Timestamp::new(10)).unwrap();
        assert!(matches!(effect, ProposalEffect::RequiredApprovalsChanged(2)));
        assert_eq!(engine.required_approvals(), 2);
    }
}
