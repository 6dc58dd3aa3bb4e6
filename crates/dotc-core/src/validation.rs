//! Offer validation: hard gate for every ledger call.
//!
//! ## Design Principles
//!
//! - **Fail-closed**: if any check fails, the call is rejected before any
//!   asset moves
//! - **No bypass**: make, take, cancel, and update all route through here
//! - **Pure**: checks read the offer, the terms, and the clock; they never
//!   mutate

use dotc_types::{
    Address, Asset, DotcError, Offer, OfferTerms, OfferUpdate, PricingMode, Result, TakingMode,
};

use crate::authorization::AuthorizationRegistry;

/// Validate a new offer's assets and terms at time `now`.
///
/// # Errors
/// Asset errors, `OfferExpired`, `IncorrectTimelockPeriod`, `AddressIsZero`,
/// `UnsupportedPartialForNonFungible`, `DynamicPricingFungibleOnly`, and
/// price-spec errors for dynamic offers.
pub fn validate_creation(
    deposit: &Asset,
    withdrawal: &Asset,
    terms: &OfferTerms,
    now: u64,
) -> Result<()> {
    deposit.validate()?;
    withdrawal.validate()?;

    validate_expiry(terms.expiry_time, now)?;
    validate_timelock(terms.timelock_until, terms.expiry_time, now)?;
    validate_addresses(&terms.special_addresses)?;
    validate_addresses(&terms.authorization_contracts)?;

    let both_fungible = deposit.is_fungible() && withdrawal.is_fungible();
    if terms.taking_mode == TakingMode::Partial && !both_fungible {
        return Err(DotcError::UnsupportedPartialForNonFungible);
    }
    if terms.pricing_mode == PricingMode::Dynamic {
        if !both_fungible {
            return Err(DotcError::DynamicPricingFungibleOnly);
        }
        terms.deposit_price.validate()?;
        terms.withdrawal_price.validate()?;
    }
    Ok(())
}

/// Validate a maker's update against the offer it would change.
///
/// New timelocks are checked against the resulting expiry.
pub fn validate_update(offer: &Offer, update: &OfferUpdate, now: u64) -> Result<()> {
    if update.is_empty() {
        return Err(DotcError::EmptyOfferUpdate);
    }
    let expiry = update.expiry_time.unwrap_or(offer.terms.expiry_time);
    if let Some(expiry) = update.expiry_time {
        validate_expiry(expiry, now)?;
    }
    if let Some(timelock) = update.timelock_until {
        validate_timelock(timelock, expiry, now)?;
    }
    if let Some(addresses) = &update.special_addresses {
        validate_addresses(addresses)?;
    }
    if let Some(addresses) = &update.authorization_contracts {
        validate_addresses(addresses)?;
    }
    Ok(())
}

/// Is `taker` admitted by the offer's allow-list and authorization contracts?
pub fn validate_taker(
    offer: &Offer,
    taker: Address,
    authorizations: &AuthorizationRegistry,
) -> Result<()> {
    let terms = &offer.terms;
    if !terms.special_addresses.is_empty() && !terms.special_addresses.contains(&taker) {
        return Err(DotcError::NotSpecialAddress(taker));
    }
    if !terms.authorization_contracts.is_empty()
        && !authorizations.any_authorizes(&terms.authorization_contracts, taker)
    {
        return Err(DotcError::NotAuthorized(taker));
    }
    Ok(())
}

/// Fails with `OfferExpired` once `now` is past the offer's expiry.
pub fn validate_not_expired(offer: &Offer, now: u64) -> Result<()> {
    if now > offer.terms.expiry_time {
        return Err(DotcError::OfferExpired {
            expiry: offer.terms.expiry_time,
            now,
        });
    }
    Ok(())
}

/// Fails with `OfferInTimelock` while `now` is before the timelock.
pub fn validate_timelock_elapsed(offer: &Offer, now: u64) -> Result<()> {
    if now < offer.terms.timelock_until {
        return Err(DotcError::OfferInTimelock {
            until: offer.terms.timelock_until,
            now,
        });
    }
    Ok(())
}

fn validate_expiry(expiry: u64, now: u64) -> Result<()> {
    if expiry <= now {
        return Err(DotcError::OfferExpired { expiry, now });
    }
    Ok(())
}

// 0 disables the timelock; otherwise it must end in the future, no later
// than expiry.
fn validate_timelock(timelock: u64, expiry: u64, now: u64) -> Result<()> {
    if timelock != 0 && (timelock <= now || timelock > expiry) {
        return Err(DotcError::IncorrectTimelockPeriod { timelock, expiry });
    }
    Ok(())
}

fn validate_addresses(addresses: &[Address]) -> Result<()> {
    if addresses.iter().any(Address::is_zero) {
        return Err(DotcError::AddressIsZero);
    }
    Ok(())
}
