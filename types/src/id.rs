//! Opaque record identifiers.
//!
//! The surrounding substrate allocates these; the core only requires that
//! they are unique within their namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

opaque_id! {
    /// Identifies a governance proposal.
    ProposalId
}

opaque_id! {
    /// Identifies a registered charging station.
    StationId
}

opaque_id! {
    /// Identifies a station settlement record.
    SettlementId
}

opaque_id! {
    /// Identifies an enterprise escrow.
    EscrowId
}
