//! Core reward engine — accrual on registration, mint on claim.

use std::collections::HashMap;

use crate::error::RewardError;
use crate::profile::RewardProfile;
use agc_ledger::{Ledger, MintAuthorization, ModuleTag};
use agc_types::{AccountAddress, ProtocolParams};

/// The reward engine.
///
/// Owns only its bookkeeping: profiles, the reward rate, and the running
/// distribution totals. Balance changes happen on the ledger, at claim
/// time, through a module mint authorization.
pub struct RewardEngine {
    /// Credits (raw units) minted per kilogram of verified reduction.
    reward_rate_per_kg: u128,
    /// Tracked participant profiles.
    profiles: HashMap<AccountAddress, RewardProfile>,
    /// Lifetime total of claimed (minted) rewards across all participants.
    total_distributed: u128,
    /// Lifetime total of registered carbon reduction, in kilograms.
    total_registered_kg: u64,
}

impl RewardEngine {
    pub fn new(reward_rate_per_kg: u128) -> Self {
        Self {
            reward_rate_per_kg,
            profiles: HashMap::new(),
            total_distributed: 0,
            total_registered_kg: 0,
        }
    }

    /// Engine configured from protocol parameters.
    pub fn from_params(params: &ProtocolParams) -> Self {
        Self::new(params.reward_rate_per_kg)
    }

    /// Register a verified carbon-reduction measurement.
    ///
    /// Accrues `carbon_kg × reward_rate` into the participant's pending
    /// rewards and returns the accrued amount. Nothing touches the ledger.
    pub fn register_activity(
        &mut self,
        account: &AccountAddress,
        carbon_kg: u64,
    ) -> Result<u128, RewardError> {
        if carbon_kg == 0 {
            return Err(RewardError::InvalidAmount);
        }
        let reward = self
            .reward_rate_per_kg
            .checked_mul(carbon_kg as u128)
            .ok_or(RewardError::Overflow)?;

        let profile = self.profiles.entry(account.clone()).or_default();
        let new_pending = profile
            .pending_rewards
            .checked_add(reward)
            .ok_or(RewardError::Overflow)?;
        let new_kg = profile
            .total_carbon_reduction_kg
            .checked_add(carbon_kg)
            .ok_or(RewardError::Overflow)?;
        let new_total_kg = self
            .total_registered_kg
            .checked_add(carbon_kg)
            .ok_or(RewardError::Overflow)?;

        profile.pending_rewards = new_pending;
        profile.total_carbon_reduction_kg = new_kg;
        self.total_registered_kg = new_total_kg;
        tracing::debug!(account = %account, carbon_kg, reward, "activity registered");
        Ok(reward)
    }

    /// Claim the full pending reward, minting it into the ledger balance.
    ///
    /// All-or-nothing: the whole pending amount moves in one step. With
    /// nothing pending this returns 0 without touching the ledger — a
    /// repeat claim is not an error.
    pub fn claim(
        &mut self,
        account: &AccountAddress,
        ledger: &mut Ledger,
    ) -> Result<u128, RewardError> {
        let pending = match self.profiles.get(account) {
            Some(profile) if profile.pending_rewards > 0 => profile.pending_rewards,
            _ => return Ok(0),
        };

        // Mint first: a ledger rejection (paused, not opted in) must leave
        // the pending balance intact for a later retry.
        ledger.mint(account, pending, MintAuthorization::module(ModuleTag::Rewards))?;

        if let Some(profile) = self.profiles.get_mut(account) {
            profile.claimed_rewards = profile.claimed_rewards.saturating_add(pending);
            profile.pending_rewards = 0;
        }
        self.total_distributed = self.total_distributed.saturating_add(pending);
        tracing::info!(account = %account, amount = pending, "rewards claimed");
        Ok(pending)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn pending_rewards(&self, account: &AccountAddress) -> u128 {
        self.profiles
            .get(account)
            .map(|p| p.pending_rewards)
            .unwrap_or(0)
    }

    pub fn claimed_rewards(&self, account: &AccountAddress) -> u128 {
        self.profiles
            .get(account)
            .map(|p| p.claimed_rewards)
            .unwrap_or(0)
    }

    pub fn total_carbon_reduction_kg(&self, account: &AccountAddress) -> u64 {
        self.profiles
            .get(account)
            .map(|p| p.total_carbon_reduction_kg)
            .unwrap_or(0)
    }

    pub fn profile(&self, account: &AccountAddress) -> Option<&RewardProfile> {
        self.profiles.get(account)
    }

    pub fn reward_rate_per_kg(&self) -> u128 {
        self.reward_rate_per_kg
    }

    pub fn total_distributed(&self) -> u128 {
        self.total_distributed
    }

    pub fn total_registered_kg(&self) -> u64 {
        self.total_registered_kg
    }
}
