//! Fee and address configuration supplied by the manager.

use serde::{Deserialize, Serialize};

use crate::{constants, Address, DotcError, Result};

/// Configuration the ledger reads from its manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Receives the protocol fee (minus any affiliate share).
    pub fee_receiver: Address,
    /// Protocol fee in basis points of the fee-bearing amount.
    #[serde(default = "default_fee_rate_bps")]
    pub fee_rate_bps: u32,
    /// Affiliate share of the protocol fee, in basis points of the fee.
    #[serde(default = "default_affiliate_share_bps")]
    pub affiliate_share_bps: u32,
    /// Bank holder address of the escrow vault.
    pub vault_address: Address,
    /// Address the vault accepts calls from.
    pub ledger_address: Address,
    /// Readings older than this are treated as invalid.
    #[serde(default = "default_max_price_age_secs")]
    pub max_price_age_secs: u64,
}

fn default_fee_rate_bps() -> u32 {
    constants::DEFAULT_FEE_RATE_BPS
}

fn default_affiliate_share_bps() -> u32 {
    constants::DEFAULT_AFFILIATE_SHARE_BPS
}

fn default_max_price_age_secs() -> u64 {
    constants::DEFAULT_MAX_PRICE_AGE_SECS
}

impl ManagerConfig {
    /// Config with default fee rate, affiliate share, and price age.
    #[must_use]
    pub fn new(fee_receiver: Address, vault_address: Address, ledger_address: Address) -> Self {
        Self {
            fee_receiver,
            fee_rate_bps: constants::DEFAULT_FEE_RATE_BPS,
            affiliate_share_bps: constants::DEFAULT_AFFILIATE_SHARE_BPS,
            vault_address,
            ledger_address,
            max_price_age_secs: constants::DEFAULT_MAX_PRICE_AGE_SECS,
        }
    }

    /// # Errors
    /// `InvalidConfig` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(DotcError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.fee_receiver.is_zero() {
            return invalid("fee_receiver is the zero address");
        }
        if self.vault_address.is_zero() || self.ledger_address.is_zero() {
            return invalid("vault and ledger addresses must be non-zero");
        }
        if self.vault_address == self.ledger_address {
            return invalid("vault and ledger must be distinct");
        }
        if self.fee_rate_bps > constants::BPS_DENOMINATOR {
            return invalid("fee_rate_bps exceeds 10000");
        }
        if self.affiliate_share_bps > constants::BPS_DENOMINATOR {
            return invalid("affiliate_share_bps exceeds 10000");
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
