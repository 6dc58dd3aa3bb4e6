//! # dotc-escrow
//!
//! **Custody plane**: the only part of the engine that moves assets.
//!
//! ## Architecture
//!
//! - [`AssetBank`]: the contract every token implementation fulfils
//!   (balances, decimals, all-or-nothing transfers)
//! - [`TokenBank`]: in-memory bank for fungible tokens and NFTs
//! - [`EscrowVault`]: per-offer custody ledger, bound to a single caller
//!
//! ```text
//!   ledger ──(caller check)──▶ EscrowVault ──transfer──▶ AssetBank
//!                                 │
//!                                 └─ record updated only after the transfer succeeds
//! ```

pub mod bank;
pub mod vault;

pub use bank::{AssetBank, TokenBank};
pub use vault::EscrowVault;
