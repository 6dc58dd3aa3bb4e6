//! # dotc-types
//!
//! Shared types, errors, and configuration for the **OpenDOTC** swap engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OfferId`]
//! - **Asset model**: [`Asset`], [`AssetKind`], [`AssetKey`], [`RawAsset`]
//! - **Offer model**: [`Offer`], [`OfferTerms`], [`OfferValidity`], [`OfferUpdate`], [`PriceSpec`]
//! - **Escrow model**: [`EscrowRecord`], [`EscrowStatus`]
//! - **Events**: [`DotcEvent`], [`EscrowEvent`]
//! - **Configuration**: [`ManagerConfig`]
//! - **Errors**: [`DotcError`] with `DOTC_ERR_` prefix codes
//! - **Constants**: fixed-point scales and defaults

pub mod asset;
pub mod config;
pub mod constants;
pub mod error;
pub mod escrow;
pub mod event;
pub mod ids;
pub mod offer;

// Re-export all primary types at crate root for ergonomic imports:
//   use dotc_types::{Asset, Offer, OfferId, DotcError, ...};

pub use asset::*;
pub use config::*;
pub use error::*;
pub use escrow::*;
pub use event::*;
pub use ids::*;
pub use offer::*;

/// Unsigned 256-bit integer used for every amount, price, and rate.
pub use primitive_types::U256;

// Constants are accessed via `dotc_types::constants::FOO`
// (not re-exported to avoid name collisions).
