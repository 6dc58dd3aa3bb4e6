//! Custody conservation invariant checker.
//!
//! Two invariants are enforced:
//! ```text
//! ∀ offer: deposited == released + fees + returned + in_custody
//! ∀ asset: Σ in_custody(records of asset) == bank.balance_of(asset, vault)
//! ```
//!
//! If either ever breaks, assets have been created or lost in custody.

use std::collections::HashMap;

use dotc_escrow::{AssetBank, EscrowVault};
use dotc_types::{AssetKey, DotcError, OfferId, Result, U256};

/// Where one offer's deposit went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustodyFlows {
    pub deposited: U256,
    pub released: U256,
    pub fees: U256,
    pub returned: U256,
}

impl CustodyFlows {
    /// Amount that should still be in custody.
    pub fn expected_remaining(&self) -> Result<U256> {
        self.released
            .checked_add(self.fees)
            .and_then(|out| out.checked_add(self.returned))
            .and_then(|out| self.deposited.checked_sub(out))
            .ok_or_else(|| DotcError::EscrowInvariantViolation {
                reason: format!(
                    "outflows exceed deposit {} (released={}, fees={}, returned={})",
                    self.deposited, self.released, self.fees, self.returned
                ),
            })
    }
}

/// Tracks per-offer custody flows and validates them against the vault.
#[derive(Debug, Default)]
pub struct SupplyAudit {
    flows: HashMap<OfferId, CustodyFlows>,
}

impl SupplyAudit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_deposit(&mut self, id: OfferId, amount: U256) {
        let flows = self.flows.entry(id).or_default();
        flows.deposited = flows.deposited.saturating_add(amount);
    }

    pub fn record_release(&mut self, id: OfferId, amount: U256) {
        let flows = self.flows.entry(id).or_default();
        flows.released = flows.released.saturating_add(amount);
    }

    pub fn record_fees(&mut self, id: OfferId, amount: U256) {
        let flows = self.flows.entry(id).or_default();
        flows.fees = flows.fees.saturating_add(amount);
    }

    pub fn record_return(&mut self, id: OfferId, amount: U256) {
        let flows = self.flows.entry(id).or_default();
        flows.returned = flows.returned.saturating_add(amount);
    }

    #[must_use]
    pub fn flows(&self, id: OfferId) -> CustodyFlows {
        self.flows.get(&id).copied().unwrap_or_default()
    }

    /// Verify both invariants against the vault and bank.
    ///
    /// # Errors
    /// [`DotcError::EscrowInvariantViolation`] naming the first mismatch.
    pub fn verify<B: AssetBank + ?Sized>(&self, vault: &EscrowVault, bank: &B) -> Result<()> {
        let mut custody: HashMap<AssetKey, U256> = HashMap::new();

        for record in vault.records() {
            let expected = self.flows(record.offer_id).expected_remaining()?;
            if record.amount != expected {
                return Err(DotcError::EscrowInvariantViolation {
                    reason: format!(
                        "offer {}: recorded custody {} != expected {expected}",
                        record.offer_id, record.amount
                    ),
                });
            }
            let total = custody.entry(record.asset.key()).or_default();
            *total = total.saturating_add(record.amount);
        }

        for (key, recorded) in custody {
            let actual = bank.balance_of(key, vault.address());
            if actual != recorded {
                return Err(DotcError::EscrowInvariantViolation {
                    reason: format!("asset {key}: vault holds {actual}, records say {recorded}"),
                });
            }
        }
        Ok(())
    }
}
