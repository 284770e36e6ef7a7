//! Mint authorization capability.
//!
//! Minting requires explicit proof of authorization: a [`MintAuthorization`]
//! is produced either by governance executing an approved mint proposal, or
//! by one of the trusted engines when it tokenizes value it already
//! accounts for (accrued rewards, settled station revenue, escrowed
//! deposits).
//!
//! The capability is consumed by value in [`crate::Ledger::mint`], so a
//! single authorization cannot pay out twice.

use agc_types::ProposalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The trusted engines that may mint on their own authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleTag {
    Rewards,
    Settlement,
    Escrow,
}

impl fmt::Display for ModuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewards => write!(f, "rewards"),
            Self::Settlement => write!(f, "settlement"),
            Self::Escrow => write!(f, "escrow"),
        }
    }
}

/// Where a mint authorization came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintProvenance {
    /// An executed governance proposal.
    Governance { proposal: ProposalId },
    /// A trusted engine minting value it accounts for.
    Module(ModuleTag),
}

/// Single-use proof that a mint is authorized.
///
/// Deliberately neither `Clone` nor `Copy`: the ledger takes it by value.
#[derive(Debug, PartialEq, Eq)]
pub struct MintAuthorization {
    provenance: MintProvenance,
}

impl MintAuthorization {
    /// Authorization backed by an executed governance proposal.
    pub fn governance(proposal: ProposalId) -> Self {
        Self {
            provenance: MintProvenance::Governance { proposal },
        }
    }

    /// Authorization from a trusted engine.
    pub fn module(tag: ModuleTag) -> Self {
        Self {
            provenance: MintProvenance::Module(tag),
        }
    }

    pub fn provenance(&self) -> &MintProvenance {
        &self.provenance
    }
}

impl fmt::Display for MintAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provenance {
            MintProvenance::Governance { proposal } => write!(f, "governance:{proposal}"),
            MintProvenance::Module(tag) => write!(f, "module:{tag}"),
        }
    }
}
