//! # Offer: the canonical swap record
//!
//! A maker locks a deposit asset and asks for a withdrawal asset in return.
//! Takers pay the withdrawal asset and receive a proportional share of the
//! deposit.
//!
//! ## State Machine
//!
//! ```text
//!   ┌───────────┐  partial take  ┌────────────────┐  final take  ┌─────────────┐
//!   │ NOT_TAKEN ├───────────────▶│ PARTIALLY_TAKEN├─────────────▶│ FULLY_TAKEN │
//!   └─┬───┬─────┘                └──┬──────▲──────┘              └─────────────┘
//!     │   │ full take               │      │ partial take              ▲
//!     │   └─────────────────────────┼──────┴───────────────────────────┘
//!     │ cancel                      │ cancel
//!     ▼                             ▼
//!   ┌───────────┐◀──────────────────┘
//!   │ CANCELLED │
//!   └───────────┘
//! ```
//!
//! `FULLY_TAKEN` and `CANCELLED` are terminal: nothing about the record
//! changes after reaching them.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{constants, Address, Asset, DotcError, OfferId, Result};

/// How an offer may be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TakingMode {
    /// Any number of takers may each fill a fraction.
    Partial,
    /// One taker fills the whole offer in a single take.
    Full,
}

/// How the exchange rate of an offer is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingMode {
    /// Rate snapshotted once at creation.
    Fixed,
    /// Rate recomputed from price sources at every take.
    Dynamic,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "FIXED"),
            Self::Dynamic => write!(f, "DYNAMIC"),
        }
    }
}

/// Lifecycle state of an offer.
///
/// Transitions are **monotonic** (never go backwards):
/// - `NotTaken → PartiallyTaken | FullyTaken | Cancelled`
/// - `PartiallyTaken → PartiallyTaken | FullyTaken | Cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferValidity {
    NotTaken,
    PartiallyTaken,
    FullyTaken,
    Cancelled,
}

impl OfferValidity {
    /// Can this offer move to the given state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::NotTaken | Self::PartiallyTaken,
                Self::PartiallyTaken | Self::FullyTaken | Self::Cancelled
            )
        )
    }

    /// `FullyTaken` and `Cancelled` accept no further operations.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyTaken | Self::Cancelled)
    }
}

impl fmt::Display for OfferValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTaken => write!(f, "NOT_TAKEN"),
            Self::PartiallyTaken => write!(f, "PARTIALLY_TAKEN"),
            Self::FullyTaken => write!(f, "FULLY_TAKEN"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Price configuration for one side of a dynamic offer.
///
/// `min` and `max` are expressed in the price source's own decimals and
/// are mutually exclusive. `buffer_bps` nudges the live price toward the
/// configured bound before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceSpec {
    /// Address of the registered price source for this asset.
    pub source: Option<Address>,
    pub min: U256,
    pub max: U256,
    pub buffer_bps: u32,
}

impl PriceSpec {
    /// A spec that reads `source` with no bounds and no buffer.
    #[must_use]
    pub fn from_source(source: Address) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// # Errors
    /// `IncorrectPercentage` if `buffer_bps > 10000`, `BothMinAndMaxSpecified`
    /// if both bounds are non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_bps > constants::BPS_DENOMINATOR {
            return Err(DotcError::IncorrectPercentage(self.buffer_bps));
        }
        if !self.min.is_zero() && !self.max.is_zero() {
            return Err(DotcError::BothMinAndMaxSpecified);
        }
        Ok(())
    }
}

/// Maker-supplied terms of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub taking_mode: TakingMode,
    pub pricing_mode: PricingMode,
    /// Price configuration of the deposit side (dynamic offers).
    pub deposit_price: PriceSpec,
    /// Price configuration of the withdrawal side (dynamic offers).
    pub withdrawal_price: PriceSpec,
    /// Takers allowed to take. Empty means anyone.
    pub special_addresses: Vec<Address>,
    /// Gatekeepers consulted on take. Empty means none.
    pub authorization_contracts: Vec<Address>,
    /// Unix seconds after which the offer can no longer be taken.
    pub expiry_time: u64,
    /// Unix seconds before which the maker cannot cancel or update. 0 = none.
    pub timelock_until: u64,
    pub terms: String,
    pub comms_link: String,
}

impl OfferTerms {
    /// Fixed-price terms with no allow-lists, no timelock, and no links.
    #[must_use]
    pub fn fixed(taking_mode: TakingMode, expiry_time: u64) -> Self {
        Self {
            taking_mode,
            pricing_mode: PricingMode::Fixed,
            deposit_price: PriceSpec::default(),
            withdrawal_price: PriceSpec::default(),
            special_addresses: Vec::new(),
            authorization_contracts: Vec::new(),
            expiry_time,
            timelock_until: 0,
            terms: String::new(),
            comms_link: String::new(),
        }
    }

    /// Dynamic-price terms reading the given per-side price specs.
    #[must_use]
    pub fn dynamic(
        taking_mode: TakingMode,
        expiry_time: u64,
        deposit_price: PriceSpec,
        withdrawal_price: PriceSpec,
    ) -> Self {
        Self {
            pricing_mode: PricingMode::Dynamic,
            deposit_price,
            withdrawal_price,
            ..Self::fixed(taking_mode, expiry_time)
        }
    }
}

/// The canonical offer record owned by the ledger.
///
/// For fungible assets the amounts are what is still outstanding; they
/// shrink with every take. `unit_price` is withdrawal per deposit in the
/// standardized domain, scaled by 10^18.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub maker: Address,
    pub validity: OfferValidity,
    pub deposit_asset: Asset,
    pub withdrawal_asset: Asset,
    pub unit_price: U256,
    pub terms: OfferTerms,
    /// Ledger time at creation.
    pub created_at: u64,
}

impl Offer {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.validity.is_terminal()
    }

    /// Move to `target`, rejecting non-monotonic transitions.
    pub fn transition_to(&mut self, target: OfferValidity) -> Result<()> {
        if !self.validity.can_transition_to(target) {
            return Err(DotcError::InvalidStateTransition {
                from: self.validity.to_string(),
                to: target.to_string(),
            });
        }
        self.validity = target;
        Ok(())
    }

    /// Create a minimal fixed, full-taking offer for testing.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn dummy(deposit_asset: Asset, withdrawal_asset: Asset) -> Self {
        Self {
            id: OfferId(0),
            maker: Address::random(),
            validity: OfferValidity::NotTaken,
            deposit_asset,
            withdrawal_asset,
            unit_price: U256::zero(),
            terms: OfferTerms::fixed(TakingMode::Full, u64::MAX),
            created_at: 0,
        }
    }
}

/// Free-text links attached to an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLinks {
    pub terms: String,
    pub comms_link: String,
}

/// A maker's change request. Only present groups are applied.
///
/// Assets and pricing are deliberately absent: they cannot change after
/// creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferUpdate {
    pub expiry_time: Option<u64>,
    pub timelock_until: Option<u64>,
    pub links: Option<OfferLinks>,
    pub special_addresses: Option<Vec<Address>>,
    pub authorization_contracts: Option<Vec<Address>>,
}

impl OfferUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiry_time.is_none()
            && self.timelock_until.is_none()
            && self.links.is_none()
            && self.special_addresses.is_none()
            && self.authorization_contracts.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_transitions_are_monotonic() {
        use OfferValidity::*;
        assert!(NotTaken.can_transition_to(PartiallyTaken));
        assert!(NotTaken.can_transition_to(FullyTaken));
        assert!(NotTaken.can_transition_to(Cancelled));
        assert!(PartiallyTaken.can_transition_to(PartiallyTaken));
        assert!(PartiallyTaken.can_transition_to(FullyTaken));
        assert!(PartiallyTaken.can_transition_to(Cancelled));

        assert!(!PartiallyTaken.can_transition_to(NotTaken));
        for terminal in [FullyTaken, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [NotTaken, PartiallyTaken, FullyTaken, Cancelled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn transition_to_rejects_leaving_terminal() {
        let token = Address::from_low_u64(1);
        let mut offer = Offer::dummy(
            Asset::erc20(token, U256::from(10)),
            Asset::erc20(token, U256::from(20)),
        );
        offer.transition_to(OfferValidity::FullyTaken).unwrap();
        let err = offer.transition_to(OfferValidity::Cancelled).unwrap_err();
        assert!(matches!(err, DotcError::InvalidStateTransition { .. }));
        assert_eq!(offer.validity, OfferValidity::FullyTaken);
    }

    #[test]
    fn price_spec_percentage_bounded() {
        let spec = PriceSpec {
            buffer_bps: 10_001,
            ..PriceSpec::default()
        };
        assert_eq!(spec.validate(), Err(DotcError::IncorrectPercentage(10_001)));

        let spec = PriceSpec {
            buffer_bps: 10_000,
            ..PriceSpec::default()
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn price_spec_bounds_exclusive() {
        let spec = PriceSpec {
            min: U256::from(1),
            max: U256::from(2),
            ..PriceSpec::default()
        };
        assert_eq!(spec.validate(), Err(DotcError::BothMinAndMaxSpecified));
    }

    #[test]
    fn empty_update_detected() {
        assert!(OfferUpdate::default().is_empty());
        let update = OfferUpdate {
            expiry_time: Some(10),
            ..OfferUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn dynamic_terms_keep_price_specs() {
        let src = Address::from_low_u64(3);
        let terms = OfferTerms::dynamic(
            TakingMode::Partial,
            100,
            PriceSpec::from_source(src),
            PriceSpec::default(),
        );
        assert_eq!(terms.pricing_mode, PricingMode::Dynamic);
        assert_eq!(terms.deposit_price.source, Some(src));
        assert_eq!(terms.expiry_time, 100);
    }
}
