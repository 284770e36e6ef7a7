//! Per-participant reward bookkeeping.

use serde::{Deserialize, Serialize};

/// Reward state for a single participant.
///
/// `pending_rewards` only grows through activity registration and only
/// returns to zero through a claim, which moves the same amount into
/// `claimed_rewards`. The carbon total is cumulative and never decreases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardProfile {
    /// Accrued, not-yet-minted reward (raw credit units).
    pub pending_rewards: u128,
    /// Lifetime total of claimed rewards (raw credit units).
    pub claimed_rewards: u128,
    /// Lifetime verified carbon reduction, in kilograms.
    pub total_carbon_reduction_kg: u64,
}
