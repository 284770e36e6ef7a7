//! Protocol parameters — every tunable value in one place.
//!
//! The admin (or a governance proposal) may change these at runtime through
//! the owning engine's setter; the struct itself is plain data.

use crate::amount::CREDIT_UNIT;
use serde::{Deserialize, Serialize};

/// All protocol parameters for the AgriCarbon credit core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    // ── Rewards ──────────────────────────────────────────────────────────
    /// Credits (raw units) minted per kilogram of verified carbon reduction.
    pub reward_rate_per_kg: u128,

    // ── Station settlement ───────────────────────────────────────────────
    /// Platform fee on station revenue, in basis points of gross.
    pub settlement_fee_bps: u32,

    // ── Governance ───────────────────────────────────────────────────────
    /// Seconds a proposal stays open for voting before it expires.
    pub proposal_lifetime_secs: u64,

    /// Approvals required before a proposal can execute.
    pub required_approvals: u32,
}

impl ProtocolParams {
    /// AgriCarbon defaults — the intended configuration for the live network.
    pub fn agc_defaults() -> Self {
        Self {
            reward_rate_per_kg: CREDIT_UNIT / 10, // 0.1 credit per kg

            settlement_fee_bps: 500, // 5%

            proposal_lifetime_secs: 7 * 24 * 3600, // 7 days
            required_approvals: 3,
        }
    }
}

/// Default is the AgriCarbon network configuration.
impl Default for ProtocolParams {
    fn default() -> Self {
        Self::agc_defaults()
    }
}
