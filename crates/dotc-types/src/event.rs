//! Lifecycle events.
//!
//! The ledger emits [`DotcEvent`]s for indexers; the vault keeps its own
//! [`EscrowEvent`] log of custody movements.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{Address, Asset, OfferId, OfferValidity, PricingMode, TakingMode};

/// Ledger-level events, one per state change of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DotcEvent {
    OfferCreated {
        id: OfferId,
        maker: Address,
        deposit_asset: Asset,
        withdrawal_asset: Asset,
        unit_price: U256,
        taking_mode: TakingMode,
        pricing_mode: PricingMode,
    },
    OfferTaken {
        id: OfferId,
        taker: Address,
        validity: OfferValidity,
        deposit_amount: U256,
        withdrawal_amount: U256,
        affiliate: Option<Address>,
    },
    OfferCanceled {
        id: OfferId,
        maker: Address,
        amount_returned: U256,
    },
    OfferExpiryUpdated {
        id: OfferId,
        expiry_time: u64,
    },
    OfferTimelockUpdated {
        id: OfferId,
        timelock_until: u64,
    },
    OfferLinksUpdated {
        id: OfferId,
        terms: String,
        comms_link: String,
    },
    OfferSpecialAddressesUpdated {
        id: OfferId,
        special_addresses: Vec<Address>,
    },
    OfferAuthorizationContractsUpdated {
        id: OfferId,
        authorization_contracts: Vec<Address>,
    },
}

impl DotcEvent {
    /// The offer this event concerns.
    #[must_use]
    pub fn offer_id(&self) -> OfferId {
        match self {
            Self::OfferCreated { id, .. }
            | Self::OfferTaken { id, .. }
            | Self::OfferCanceled { id, .. }
            | Self::OfferExpiryUpdated { id, .. }
            | Self::OfferTimelockUpdated { id, .. }
            | Self::OfferLinksUpdated { id, .. }
            | Self::OfferSpecialAddressesUpdated { id, .. }
            | Self::OfferAuthorizationContractsUpdated { id, .. } => *id,
        }
    }
}

/// Vault-level custody events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowEvent {
    Deposited {
        id: OfferId,
        from: Address,
        amount: U256,
    },
    Withdrawn {
        id: OfferId,
        to: Address,
        amount: U256,
    },
    Cancelled {
        id: OfferId,
        to: Address,
        amount: U256,
    },
    FeesWithdrawn {
        id: OfferId,
        to: Address,
        amount: U256,
    },
}
