//! # dotc-pricing
//!
//! **Pricing engine**: pure, deterministic arithmetic for the swap engine.
//!
//! ## Architecture
//!
//! This crate has **zero side effects**:
//! - No custody, no balances, no offer storage
//! - Only computation: standardize amounts → derive unit prices → split fees
//!
//! The only external input is a [`PriceSource`] reading, consulted by the
//! [`PricingEngine`] for dynamic offers.
//!
//! ```text
//!   native amount ──standardize──▶ 10^27 domain ──× 10^18 / deposit──▶ unit price
//!                                                                        │
//!   PriceSource ──reading──▶ buffer ──▶ clamp(min|max) ──────────────────┘
//! ```
//!
//! Every operation floors: rounding always truncates toward zero.

pub mod engine;
pub mod fees;
pub mod fixed_point;
pub mod price_source;

pub use engine::PricingEngine;
pub use fees::{calculate_fees, FeeSplit};
pub use fixed_point::{
    deposit_for_withdrawal, standardize, unit_price, unstandardize, withdrawal_for_deposit,
};
pub use price_source::{PriceReading, PriceSource, PriceSourceRegistry};

#[cfg(any(test, feature = "test-helpers"))]
pub use price_source::MockPriceSource;
