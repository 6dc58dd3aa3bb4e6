//! Error types for the OpenDOTC swap engine.
//!
//! All errors use the `DOTC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Asset descriptor errors
//! - 2xx: Pricing errors
//! - 3xx: Offer validation errors
//! - 4xx: Ledger state errors
//! - 5xx: Escrow vault errors
//! - 6xx: Asset bank errors
//! - 7xx: Configuration / general errors
//!
//! Every error is local to the operation that raised it: a failed call
//! leaves offers, escrow records, and balances exactly as they were.

use primitive_types::U256;
use thiserror::Error;

use crate::{Address, OfferId, OfferValidity, PricingMode};

/// Central error enum for all OpenDOTC operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotcError {
    // =================================================================
    // Asset Errors (1xx)
    // =================================================================
    /// The wire asset type code does not name a known asset kind.
    #[error("DOTC_ERR_100: Asset type undefined: {0}")]
    AssetTypeUndefined(u8),

    #[error("DOTC_ERR_101: Asset address is zero")]
    AssetAddressZero,

    #[error("DOTC_ERR_102: Asset amount is zero")]
    AssetAmountZero,

    /// A unique NFT always represents exactly one token.
    #[error("DOTC_ERR_103: Unique NFT amount must be one, got {0}")]
    NftAmountExceedsOne(U256),

    // =================================================================
    // Pricing Errors (2xx)
    // =================================================================
    /// The price source is unknown, returned a non-positive answer, or is stale.
    #[error("DOTC_ERR_200: Incorrect price source: {0}")]
    IncorrectPriceSource(Address),

    /// Percentage buffer above 10000 bps.
    #[error("DOTC_ERR_201: Incorrect percentage: {0} bps")]
    IncorrectPercentage(u32),

    #[error("DOTC_ERR_202: Both min and max price bounds specified")]
    BothMinAndMaxSpecified,

    /// `take_offer_fixed` on a dynamic offer, or the reverse.
    #[error("DOTC_ERR_203: Incorrect pricing mode: offer is {actual}, call expects {expected}")]
    IncorrectPricingMode {
        expected: PricingMode,
        actual: PricingMode,
    },

    /// The current dynamic rate exceeds the taker's slippage limit.
    #[error("DOTC_ERR_204: Deposit to withdrawal rate {rate} exceeds maximum {max}")]
    DepositToWithdrawalRateOverflow { rate: U256, max: U256 },

    // =================================================================
    // Offer Validation Errors (3xx)
    // =================================================================
    #[error("DOTC_ERR_300: Offer expired: expiry {expiry}, now {now}")]
    OfferExpired { expiry: u64, now: u64 },

    /// Timelock must be 0, or strictly after now and no later than expiry.
    #[error("DOTC_ERR_301: Incorrect timelock period: timelock {timelock}, expiry {expiry}")]
    IncorrectTimelockPeriod { timelock: u64, expiry: u64 },

    #[error("DOTC_ERR_302: Address is zero")]
    AddressIsZero,

    #[error("DOTC_ERR_303: Partial taking is only supported for fungible assets")]
    UnsupportedPartialForNonFungible,

    #[error("DOTC_ERR_304: Dynamic pricing is only supported for fungible assets")]
    DynamicPricingFungibleOnly,

    #[error("DOTC_ERR_305: Taker {0} is not on the offer's allow-list")]
    NotSpecialAddress(Address),

    #[error("DOTC_ERR_306: Taker {0} is not authorized by any authorization contract")]
    NotAuthorized(Address),

    #[error("DOTC_ERR_307: Offer in timelock until {until}, now {now}")]
    OfferInTimelock { until: u64, now: u64 },

    #[error("DOTC_ERR_308: Offer update changes nothing")]
    EmptyOfferUpdate,

    // =================================================================
    // Ledger State Errors (4xx)
    // =================================================================
    #[error("DOTC_ERR_400: Offer not found: {0}")]
    OfferNotFound(OfferId),

    /// The offer is terminal (fully taken or cancelled).
    #[error("DOTC_ERR_401: Offer {id} is invalid: {validity}")]
    OfferInvalid { id: OfferId, validity: OfferValidity },

    #[error("DOTC_ERR_402: Only the maker may do this, caller {0}")]
    OnlyMaker(Address),

    /// A full offer was taken with a nonzero amount different from the whole.
    #[error("DOTC_ERR_403: Full offer must be paid fully, got {0}")]
    FullOfferMustBePaidFully(U256),

    #[error("DOTC_ERR_404: Withdrawal amount {requested} exceeds outstanding {available}")]
    WithdrawalAmountExceedsOffer { requested: U256, available: U256 },

    #[error("DOTC_ERR_405: Maker cannot take their own offer")]
    MakerCannotTakeOwnOffer,

    #[error("DOTC_ERR_406: Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    /// A mutating ledger call was entered while another was in flight.
    #[error("DOTC_ERR_407: Reentrant call rejected")]
    ReentrantCall,

    // =================================================================
    // Escrow Vault Errors (5xx)
    // =================================================================
    /// The vault only answers to the ledger it was bound to.
    #[error("DOTC_ERR_500: Only the authorized caller may use the vault, got {0}")]
    OnlyAuthorizedCaller(Address),

    #[error("DOTC_ERR_501: Escrow record not found for offer {0}")]
    EscrowNotFound(OfferId),

    #[error("DOTC_ERR_502: Escrow already exists for offer {0}")]
    EscrowAlreadyExists(OfferId),

    #[error("DOTC_ERR_503: Withdraw amount is zero")]
    WithdrawAmountZero,

    #[error("DOTC_ERR_504: Cancel amount is zero")]
    CancelAmountZero,

    #[error("DOTC_ERR_505: Fees amount is zero")]
    FeesAmountZero,

    #[error("DOTC_ERR_506: Escrow holds {available}, requested {requested}")]
    EscrowAmountExceeded { requested: U256, available: U256 },

    /// Recorded custody and actual bank balance diverged. Never expected.
    #[error("DOTC_ERR_507: Escrow invariant violation: {reason}")]
    EscrowInvariantViolation { reason: String },

    // =================================================================
    // Asset Bank Errors (6xx)
    // =================================================================
    #[error("DOTC_ERR_600: Insufficient balance for {holder}: need {needed}, have {available}")]
    InsufficientBalance {
        holder: Address,
        needed: U256,
        available: U256,
    },

    /// The bank has no decimals registered for this token.
    #[error("DOTC_ERR_601: Unknown token: {0}")]
    UnknownToken(Address),

    // =================================================================
    // Configuration / General Errors (7xx)
    // =================================================================
    #[error("DOTC_ERR_700: Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("DOTC_ERR_701: Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("DOTC_ERR_702: Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("DOTC_ERR_703: Serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for OpenDOTC results.
pub type Result<T> = std::result::Result<T, DotcError>;

impl From<serde_json::Error> for DotcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
