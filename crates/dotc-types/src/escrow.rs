//! Escrow record: per-offer custody bookkeeping owned by the vault.
//!
//! ## State Machine
//!
//! ```text
//!   ┌───────┐ deposit ┌───────────┐ withdraw all ┌─────────────────┐
//!   │ EMPTY ├────────▶│ DEPOSITED ├─────────────▶│ FULLY_WITHDRAWN │
//!   └───────┘         └──┬───┬────┘              └─────────────────┘
//!                        │   │ withdraw part             ▲
//!                 cancel │   ▼                           │ withdraw rest
//!                        │ ┌─────────────────────┐       │
//!                        │ │ PARTIALLY_WITHDRAWN ├───────┘
//!                        │ └──────────┬──────────┘
//!                        ▼            │ cancel
//!                   ┌───────────┐     │
//!                   │ CANCELLED │◀────┘
//!                   └───────────┘
//! ```

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{Address, Asset, DotcError, OfferId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowStatus {
    Empty,
    Deposited,
    PartiallyWithdrawn,
    FullyWithdrawn,
    Cancelled,
}

impl EscrowStatus {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Empty, Self::Deposited)
                | (
                    Self::Deposited | Self::PartiallyWithdrawn,
                    Self::PartiallyWithdrawn | Self::FullyWithdrawn | Self::Cancelled
                )
        )
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "EMPTY"),
            Self::Deposited => write!(f, "DEPOSITED"),
            Self::PartiallyWithdrawn => write!(f, "PARTIALLY_WITHDRAWN"),
            Self::FullyWithdrawn => write!(f, "FULLY_WITHDRAWN"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Custody held for one offer.
///
/// `amount` always equals the vault's actual bank balance attributable to
/// this offer. `asset` keeps the originally deposited descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    pub offer_id: OfferId,
    pub depositor: Address,
    pub asset: Asset,
    pub amount: U256,
    pub status: EscrowStatus,
}

impl EscrowRecord {
    /// Move to `target`, rejecting non-monotonic transitions.
    pub fn transition_to(&mut self, target: EscrowStatus) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(DotcError::InvalidStateTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        self.status = target;
        Ok(())
    }
}
