//! Price source abstraction.
//!
//! The engine is agnostic to where prices come from. Any oracle adapter
//! implements [`PriceSource`] and is registered under an address that
//! offers refer to.
//!
//! ## Validity contract
//!
//! A reading is usable only when all of these hold:
//! - `answer > 0`
//! - `updated_at != 0` and `updated_at <= now`
//! - `now - updated_at <= max_age_secs`
//!
//! Anything else, including an unregistered address, surfaces as
//! [`DotcError::IncorrectPriceSource`].

use std::{collections::HashMap, sync::Arc};

use dotc_types::{Address, DotcError, Result, U256};

/// Latest answer published by a price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceReading {
    /// Signed answer, as oracles report it.
    pub answer: i128,
    /// Decimals of `answer`.
    pub decimals: u8,
    /// Unix seconds of the last update.
    pub updated_at: u64,
}

impl PriceReading {
    #[must_use]
    pub fn is_stale(&self, now: u64, max_age_secs: u64) -> bool {
        self.updated_at == 0
            || self.updated_at > now
            || now - self.updated_at > max_age_secs
    }

    /// The answer as an unsigned amount, if the reading is usable.
    #[must_use]
    pub fn validated(&self, now: u64, max_age_secs: u64) -> Option<U256> {
        if self.answer <= 0 || self.is_stale(now, max_age_secs) {
            return None;
        }
        u128::try_from(self.answer).ok().map(U256::from)
    }
}

/// Anything that can report a last-known price.
pub trait PriceSource: Send + Sync {
    fn latest(&self) -> PriceReading;
}

/// Price sources indexed by the address offers refer to them by.
#[derive(Default, Clone)]
pub struct PriceSourceRegistry {
    sources: HashMap<Address, Arc<dyn PriceSource>>,
}

impl PriceSourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source at `address`.
    pub fn register(&mut self, address: Address, source: Arc<dyn PriceSource>) {
        self.sources.insert(address, source);
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.sources.contains_key(address)
    }

    /// Read a validated price and its decimals.
    ///
    /// # Errors
    /// `IncorrectPriceSource(address)` if the source is unknown or its
    /// reading violates the validity contract.
    pub fn read(&self, address: Address, now: u64, max_age_secs: u64) -> Result<(U256, u8)> {
        let source = self
            .sources
            .get(&address)
            .ok_or(DotcError::IncorrectPriceSource(address))?;
        let reading = source.latest();
        match reading.validated(now, max_age_secs) {
            Some(answer) => Ok((answer, reading.decimals)),
            None => {
                tracing::warn!(
                    source = %address,
                    answer = reading.answer,
                    updated_at = reading.updated_at,
                    now,
                    "Rejected price reading"
                );
                Err(DotcError::IncorrectPriceSource(address))
            }
        }
    }
}

impl std::fmt::Debug for PriceSourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSourceRegistry")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// MockPriceSource (test-only)
// ---------------------------------------------------------------------------

/// Settable price source for deterministic tests.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug)]
pub struct MockPriceSource {
    reading: std::sync::RwLock<PriceReading>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl MockPriceSource {
    #[must_use]
    pub fn new(answer: i128, decimals: u8, updated_at: u64) -> Self {
        Self {
            reading: std::sync::RwLock::new(PriceReading {
                answer,
                decimals,
                updated_at,
            }),
        }
    }

    pub fn set_answer(&self, answer: i128, updated_at: u64) {
        let mut reading = self
            .reading
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        reading.answer = answer;
        reading.updated_at = updated_at;
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl PriceSource for MockPriceSource {
    fn latest(&self) -> PriceReading {
        *self
            .reading
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
