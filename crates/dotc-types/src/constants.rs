//! System-wide constants for the OpenDOTC swap engine.

/// Decimals of the common fixed-point domain amounts are standardized into.
pub const STANDARD_DECIMALS: u32 = 27;

/// Decimals of a fixed offer's unit price (withdrawal per deposit).
pub const RATE_DECIMALS: u32 = 18;

/// Denominator for every basis-point quantity (fees, shares, buffers).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Default protocol fee: 0.25% of the fee-bearing amount.
pub const DEFAULT_FEE_RATE_BPS: u32 = 25;

/// Default affiliate share of the protocol fee: 80%.
pub const DEFAULT_AFFILIATE_SHARE_BPS: u32 = 8_000;

/// Default maximum age of a price reading before it is considered stale.
pub const DEFAULT_MAX_PRICE_AGE_SECS: u64 = 3_600;

/// Non-fungible assets carry no fractional precision.
pub const NFT_DECIMALS: u8 = 0;

/// Wire code for a fungible ERC20-style asset.
pub const ASSET_TYPE_ERC20: u8 = 1;

/// Wire code for a unique (ERC721-style) NFT.
pub const ASSET_TYPE_NFT_UNIQUE: u8 = 2;

/// Wire code for a semi-fungible (ERC1155-style) NFT.
pub const ASSET_TYPE_NFT_FUNGIBLE: u8 = 3;
