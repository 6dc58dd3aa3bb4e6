//! # dotc-core
//!
//! **Offer ledger**: the canonical record of every offer and the only
//! entry point for makers and takers.
//!
//! ## Architecture
//!
//! The [`Dotc`] ledger owns the offer table, the asset bank, and the
//! escrow vault bound to it. Every mutating call:
//! 1. Enters the [`ReentrancyLock`]
//! 2. Validates terms, caller, and time ([`validation`])
//! 3. Prices the take ([`dotc_pricing::PricingEngine`])
//! 4. Moves assets (taker payments, then vault releases)
//! 5. Updates the offer record and emits a [`DotcEvent`](dotc_types::DotcEvent)
//!
//! Nothing is written before step 4 succeeds, so a failed call leaves no
//! trace.
//!
//! ```text
//!   maker ── make_offer ──▶ validate ──▶ Vault.set_deposit ──▶ NOT_TAKEN
//!   taker ── take_offer ──▶ validate ──▶ price ──▶ pay maker/fees ──▶ Vault.withdraw_deposit
//!   maker ── cancel_offer ─▶ validate ──▶ Vault.cancel_deposit ──▶ CANCELLED
//! ```

pub mod authorization;
pub mod clock;
pub mod conservation;
pub mod ledger;
pub mod reentrancy;
pub mod telemetry;
pub mod validation;

pub use authorization::{AllowListAuthorization, AuthorizationRegistry, TakerAuthorization};
pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-helpers"))]
pub use clock::ManualClock;
pub use conservation::SupplyAudit;
pub use ledger::{Dotc, FeeSide, TakeOutcome};
pub use reentrancy::ReentrancyLock;
