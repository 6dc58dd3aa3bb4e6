//! Escrow vault: per-offer custody.
//!
//! The vault holds every maker deposit under its own bank address and
//! tracks, per offer id, how much of it is still in custody. It is bound
//! at construction to exactly one caller (the ledger) and rejects every
//! mutating call from anyone else.
//!
//! Each operation transfers first and records second: if the bank
//! refuses the transfer, the record is untouched, so a record's `amount`
//! always equals what the vault actually holds for that offer.

use std::collections::HashMap;

use dotc_types::{
    Address, Asset, DotcError, EscrowEvent, EscrowRecord, EscrowStatus, OfferId, Result, U256,
};

use crate::bank::AssetBank;

/// Custody ledger for offer deposits.
#[derive(Debug)]
pub struct EscrowVault {
    /// Bank holder address of the vault itself.
    address: Address,
    /// The only caller allowed to mutate custody.
    authorized_caller: Address,
    /// Custody records indexed by offer id.
    records: HashMap<OfferId, EscrowRecord>,
    /// Custody events, in emission order.
    events: Vec<EscrowEvent>,
}

impl EscrowVault {
    /// Create a vault holding assets at `address`, answering only to
    /// `authorized_caller`.
    #[must_use]
    pub fn new(address: Address, authorized_caller: Address) -> Self {
        Self {
            address,
            authorized_caller,
            records: HashMap::new(),
            events: Vec::new(),
        }
    }

    fn ensure_caller(&self, caller: Address) -> Result<()> {
        if caller == self.authorized_caller {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "Rejected vault call from unauthorized caller");
            Err(DotcError::OnlyAuthorizedCaller(caller))
        }
    }

    /// Pull `asset` from `from` into custody for offer `id`.
    ///
    /// # Errors
    /// - `OnlyAuthorizedCaller` if `caller` is not the bound ledger
    /// - `EscrowAlreadyExists` if `id` already has a record
    /// - asset validation errors, or the bank's transfer error
    pub fn set_deposit<B: AssetBank + ?Sized>(
        &mut self,
        caller: Address,
        bank: &mut B,
        id: OfferId,
        from: Address,
        asset: Asset,
    ) -> Result<()> {
        self.ensure_caller(caller)?;
        if self.records.contains_key(&id) {
            return Err(DotcError::EscrowAlreadyExists(id));
        }
        asset.validate()?;

        let amount = asset.amount();
        bank.transfer(asset.key(), from, self.address, amount)?;

        self.records.insert(
            id,
            EscrowRecord {
                offer_id: id,
                depositor: from,
                asset,
                amount,
                status: EscrowStatus::Deposited,
            },
        );
        self.events.push(EscrowEvent::Deposited { id, from, amount });
        tracing::info!(offer = %id, from = %from, amount = %amount, "Deposit escrowed");
        Ok(())
    }

    /// Check that `amount` could be withdrawn from offer `id` right now.
    pub fn check_withdrawable(&self, id: OfferId, amount: U256) -> Result<()> {
        let record = self.records.get(&id).ok_or(DotcError::EscrowNotFound(id))?;
        if record.amount.is_zero() {
            return Err(DotcError::AssetAmountZero);
        }
        if amount.is_zero() {
            return Err(DotcError::WithdrawAmountZero);
        }
        if amount > record.amount {
            return Err(DotcError::EscrowAmountExceeded {
                requested: amount,
                available: record.amount,
            });
        }
        Ok(())
    }

    /// Release `amount` of offer `id`'s custody to `to`.
    ///
    /// # Errors
    /// - `OnlyAuthorizedCaller`, `EscrowNotFound`
    /// - `AssetAmountZero` if nothing is left in custody
    /// - `WithdrawAmountZero` if `amount` is zero
    /// - `EscrowAmountExceeded` if `amount` exceeds custody
    pub fn withdraw_deposit<B: AssetBank + ?Sized>(
        &mut self,
        caller: Address,
        bank: &mut B,
        id: OfferId,
        amount: U256,
        to: Address,
    ) -> Result<()> {
        self.release(caller, bank, id, amount, to)?;
        self.events.push(EscrowEvent::Withdrawn { id, to, amount });
        tracing::info!(offer = %id, to = %to, amount = %amount, "Deposit withdrawn");
        Ok(())
    }

    /// Pay `amount` of offer `id`'s custody to a fee recipient.
    ///
    /// # Errors
    /// `FeesAmountZero` if `amount` is zero; otherwise as [`Self::withdraw_deposit`].
    pub fn withdraw_fees<B: AssetBank + ?Sized>(
        &mut self,
        caller: Address,
        bank: &mut B,
        id: OfferId,
        amount: U256,
        to: Address,
    ) -> Result<()> {
        self.ensure_caller(caller)?;
        if amount.is_zero() {
            return Err(DotcError::FeesAmountZero);
        }
        self.release(caller, bank, id, amount, to)?;
        self.events.push(EscrowEvent::FeesWithdrawn { id, to, amount });
        tracing::debug!(offer = %id, to = %to, amount = %amount, "Fees withdrawn");
        Ok(())
    }

    /// Return the whole remaining custody of offer `id` to `to`.
    ///
    /// # Errors
    /// `OnlyAuthorizedCaller`, `EscrowNotFound`, `CancelAmountZero`.
    pub fn cancel_deposit<B: AssetBank + ?Sized>(
        &mut self,
        caller: Address,
        bank: &mut B,
        id: OfferId,
        to: Address,
    ) -> Result<U256> {
        self.ensure_caller(caller)?;
        let record = self.records.get(&id).ok_or(DotcError::EscrowNotFound(id))?;
        if record.amount.is_zero() {
            return Err(DotcError::CancelAmountZero);
        }
        let amount = record.amount;
        let key = record.asset.key();

        bank.transfer(key, self.address, to, amount)?;

        let record = self
            .records
            .get_mut(&id)
            .ok_or(DotcError::EscrowNotFound(id))?;
        record.amount = U256::zero();
        record.transition_to(EscrowStatus::Cancelled)?;
        self.events.push(EscrowEvent::Cancelled { id, to, amount });
        tracing::info!(offer = %id, to = %to, amount = %amount, "Deposit returned");
        Ok(amount)
    }

    fn release<B: AssetBank + ?Sized>(
        &mut self,
        caller: Address,
        bank: &mut B,
        id: OfferId,
        amount: U256,
        to: Address,
    ) -> Result<()> {
        self.ensure_caller(caller)?;
        self.check_withdrawable(id, amount)?;
        let record = self
            .records
            .get_mut(&id)
            .ok_or(DotcError::EscrowNotFound(id))?;

        bank.transfer(record.asset.key(), self.address, to, amount)?;

        record.amount -= amount;
        let status = if record.amount.is_zero() {
            EscrowStatus::FullyWithdrawn
        } else {
            EscrowStatus::PartiallyWithdrawn
        };
        record.transition_to(status)
    }

    /// Look up the custody record of offer `id`.
    #[must_use]
    pub fn escrow(&self, id: OfferId) -> Option<&EscrowRecord> {
        self.records.get(&id)
    }

    /// All custody records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &EscrowRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<EscrowEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn authorized_caller(&self) -> Address {
        self.authorized_caller
    }
}
