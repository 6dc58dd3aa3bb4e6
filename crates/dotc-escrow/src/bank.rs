//! Asset bank: balances of every token, per holder.
//!
//! Fungible tokens live on token id 0; NFTs on their own id. A transfer
//! either moves the full amount or fails without touching any balance.

use std::collections::HashMap;

use dotc_types::{Address, AssetKey, DotcError, Result, U256};

/// Token implementation the engine moves assets through.
pub trait AssetBank {
    /// Decimals of a fungible token.
    ///
    /// # Errors
    /// `UnknownToken` if the token is not known to the bank.
    fn decimals(&self, token: Address) -> Result<u8>;

    fn balance_of(&self, key: AssetKey, holder: Address) -> U256;

    /// Move `amount` of `key` from `from` to `to`. Atomic.
    ///
    /// # Errors
    /// `InsufficientBalance` if `from` holds less than `amount`.
    fn transfer(&mut self, key: AssetKey, from: Address, to: Address, amount: U256) -> Result<()>;
}

/// In-memory [`AssetBank`].
#[derive(Debug, Clone, Default)]
pub struct TokenBank {
    /// Per-(asset, holder) balances.
    balances: HashMap<(AssetKey, Address), U256>,
    /// Decimals of registered fungible tokens.
    decimals: HashMap<Address, u8>,
}

impl TokenBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fungible token with its decimals.
    pub fn register_token(&mut self, token: Address, decimals: u8) {
        self.decimals.insert(token, decimals);
    }

    /// Create `amount` of `key` out of thin air for `holder`.
    ///
    /// # Errors
    /// `ArithmeticOverflow` if the balance would exceed `U256::MAX`.
    pub fn mint(&mut self, key: AssetKey, holder: Address, amount: U256) -> Result<()> {
        let entry = self.balances.entry((key, holder)).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(DotcError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Sum of every holder's balance of `key`.
    #[must_use]
    pub fn total_supply(&self, key: AssetKey) -> U256 {
        self.balances
            .iter()
            .filter(|((k, _), _)| *k == key)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }
}

impl AssetBank for TokenBank {
    fn decimals(&self, token: Address) -> Result<u8> {
        self.decimals
            .get(&token)
            .copied()
            .ok_or(DotcError::UnknownToken(token))
    }

    fn balance_of(&self, key: AssetKey, holder: Address) -> U256 {
        self.balances
            .get(&(key, holder))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, key: AssetKey, from: Address, to: Address, amount: U256) -> Result<()> {
        let available = self.balance_of(key, from);
        if available < amount {
            return Err(DotcError::InsufficientBalance {
                holder: from,
                needed: amount,
                available,
            });
        }
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let credited = self
            .balance_of(key, to)
            .checked_add(amount)
            .ok_or(DotcError::ArithmeticOverflow)?;

        self.balances.insert((key, from), available - amount);
        self.balances.insert((key, to), credited);
        Ok(())
    }
}
