//! Exchange-rate derivation.
//!
//! Rates are always expressed as a unit price: withdrawal per deposit in
//! the standardized domain, scaled by `10^18`. Fixed offers return the
//! price snapshotted at creation. Dynamic offers derive it from both
//! sides' price sources at call time:
//!
//! ```text
//! side price = standardize(reading)
//!              max set → + buffer, then min(·, max)
//!              min set → − buffer, then max(·, min)
//! unit price = deposit side × 10^18 / withdrawal side
//! ```

use dotc_types::{constants, Address, DotcError, Offer, PriceSpec, PricingMode, Result, U256};

use crate::{
    fixed_point::{bps_of, mul_div, pow10, standardize},
    PriceSourceRegistry,
};

/// Rate calculator bound to a price-source registry and a point in time.
pub struct PricingEngine<'a> {
    sources: &'a PriceSourceRegistry,
    now: u64,
    max_price_age_secs: u64,
}

impl<'a> PricingEngine<'a> {
    #[must_use]
    pub fn new(sources: &'a PriceSourceRegistry, now: u64, max_price_age_secs: u64) -> Self {
        Self {
            sources,
            now,
            max_price_age_secs,
        }
    }

    /// Current unit price of `offer`.
    pub fn current_rate(&self, offer: &Offer) -> Result<U256> {
        match offer.terms.pricing_mode {
            PricingMode::Fixed => Ok(offer.unit_price),
            PricingMode::Dynamic => {
                self.dynamic_unit_price(&offer.terms.deposit_price, &offer.terms.withdrawal_price)
            }
        }
    }

    /// Unit price derived from the two sides' live prices.
    ///
    /// # Errors
    /// `IncorrectPriceSource`, `IncorrectPercentage`, `BothMinAndMaxSpecified`.
    pub fn dynamic_unit_price(&self, deposit: &PriceSpec, withdrawal: &PriceSpec) -> Result<U256> {
        let deposit_price = self.side_price(deposit)?;
        let withdrawal_price = self.side_price(withdrawal)?;
        let rate = mul_div(
            deposit_price,
            pow10(constants::RATE_DECIMALS)?,
            withdrawal_price,
        )?;
        tracing::debug!(
            deposit_price = %deposit_price,
            withdrawal_price = %withdrawal_price,
            rate = %rate,
            "Dynamic rate computed"
        );
        Ok(rate)
    }

    /// Standardized, buffered, and clamped price of one side.
    pub fn side_price(&self, spec: &PriceSpec) -> Result<U256> {
        spec.validate()?;
        let source = spec
            .source
            .ok_or(DotcError::IncorrectPriceSource(Address::ZERO))?;
        let (answer, decimals) = self.sources.read(source, self.now, self.max_price_age_secs)?;
        let live = standardize(answer, decimals)?;

        let price = if !spec.max.is_zero() {
            let buffered = live
                .checked_add(bps_of(live, spec.buffer_bps)?)
                .ok_or(DotcError::ArithmeticOverflow)?;
            buffered.min(standardize(spec.max, decimals)?)
        } else if !spec.min.is_zero() {
            let buffered = live - bps_of(live, spec.buffer_bps)?;
            buffered.max(standardize(spec.min, decimals)?)
        } else {
            live
        };

        // A price that standardizes to zero cannot anchor a ratio.
        if price.is_zero() {
            return Err(DotcError::IncorrectPriceSource(source));
        }
        Ok(price)
    }
}
