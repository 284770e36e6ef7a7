//! Carbon-reward accrual for the AgriCarbon core.
//!
//! Verified carbon-reduction measurements accrue a pending reward balance
//! per participant: `reward = carbon_kg × reward_rate`. Pending rewards are
//! bookkeeping only — nothing reaches the ledger until the participant
//! claims, at which point the full pending amount is minted in one step and
//! moved to the claimed total. A claim with nothing pending returns 0 and
//! touches nothing.

pub mod engine;
pub mod error;
pub mod profile;

pub use engine::RewardEngine;
pub use error::RewardError;
pub use profile::RewardProfile;
