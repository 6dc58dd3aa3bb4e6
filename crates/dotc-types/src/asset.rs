//! Asset descriptors.
//!
//! An [`Asset`] names what is being swapped and how much of it. Each kind
//! carries only the fields that mean something for it: a fungible token has
//! no token id, a unique NFT has no amount (it is always exactly one).
//!
//! [`RawAsset`] is the flat wire form. Converting it is where undefined
//! type codes and malformed NFT amounts are rejected.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{constants, Address, DotcError, Result};

/// The three supported asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Divisible fungible token (ERC20-style).
    Erc20,
    /// Unique non-fungible token (ERC721-style).
    NftUnique,
    /// Semi-fungible token with a per-id balance (ERC1155-style).
    NftFungible,
}

impl AssetKind {
    /// Wire code for this kind.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Erc20 => constants::ASSET_TYPE_ERC20,
            Self::NftUnique => constants::ASSET_TYPE_NFT_UNIQUE,
            Self::NftFungible => constants::ASSET_TYPE_NFT_FUNGIBLE,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Erc20 => write!(f, "ERC20"),
            Self::NftUnique => write!(f, "NFT_UNIQUE"),
            Self::NftFungible => write!(f, "NFT_FUNGIBLE"),
        }
    }
}

/// Key of a balance line in an asset bank: a token contract plus a token id.
/// Fungible tokens always use token id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub token: Address,
    pub token_id: U256,
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token_id.is_zero() {
            write!(f, "{}", self.token)
        } else {
            write!(f, "{}#{}", self.token, self.token_id)
        }
    }
}

/// A typed asset descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Asset {
    Erc20 {
        token: Address,
        amount: U256,
    },
    NftUnique {
        token: Address,
        token_id: U256,
    },
    NftFungible {
        token: Address,
        token_id: U256,
        amount: U256,
    },
}

impl Asset {
    #[must_use]
    pub fn erc20(token: Address, amount: U256) -> Self {
        Self::Erc20 { token, amount }
    }

    #[must_use]
    pub fn nft_unique(token: Address, token_id: U256) -> Self {
        Self::NftUnique { token, token_id }
    }

    #[must_use]
    pub fn nft_fungible(token: Address, token_id: U256, amount: U256) -> Self {
        Self::NftFungible {
            token,
            token_id,
            amount,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Erc20 { .. } => AssetKind::Erc20,
            Self::NftUnique { .. } => AssetKind::NftUnique,
            Self::NftFungible { .. } => AssetKind::NftFungible,
        }
    }

    #[must_use]
    pub fn token(&self) -> Address {
        match self {
            Self::Erc20 { token, .. }
            | Self::NftUnique { token, .. }
            | Self::NftFungible { token, .. } => *token,
        }
    }

    /// Token id; always zero for fungible tokens.
    #[must_use]
    pub fn token_id(&self) -> U256 {
        match self {
            Self::Erc20 { .. } => U256::zero(),
            Self::NftUnique { token_id, .. } | Self::NftFungible { token_id, .. } => *token_id,
        }
    }

    /// Quantity described. A unique NFT is always one.
    #[must_use]
    pub fn amount(&self) -> U256 {
        match self {
            Self::Erc20 { amount, .. } | Self::NftFungible { amount, .. } => *amount,
            Self::NftUnique { .. } => U256::one(),
        }
    }

    /// The bank balance line this asset lives on.
    #[must_use]
    pub fn key(&self) -> AssetKey {
        AssetKey {
            token: self.token(),
            token_id: self.token_id(),
        }
    }

    /// Whether this asset is divisible (partial takes, dynamic pricing, fees).
    #[must_use]
    pub fn is_fungible(&self) -> bool {
        matches!(self, Self::Erc20 { .. })
    }

    /// Same asset with a different quantity.
    ///
    /// A unique NFT can only be restated with amount one.
    pub fn with_amount(&self, amount: U256) -> Result<Self> {
        match *self {
            Self::Erc20 { token, .. } => Ok(Self::Erc20 { token, amount }),
            Self::NftFungible {
                token, token_id, ..
            } => Ok(Self::NftFungible {
                token,
                token_id,
                amount,
            }),
            Self::NftUnique { .. } if amount == U256::one() => Ok(*self),
            Self::NftUnique { .. } => Err(DotcError::NftAmountExceedsOne(amount)),
        }
    }

    /// Validate the descriptor: non-zero token address and non-zero amount.
    ///
    /// # Errors
    /// `AssetAddressZero` or `AssetAmountZero`.
    pub fn validate(&self) -> Result<()> {
        if self.token().is_zero() {
            return Err(DotcError::AssetAddressZero);
        }
        if self.amount().is_zero() {
            return Err(DotcError::AssetAmountZero);
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} of {}", self.amount(), self.kind(), self.key())
    }
}

/// Flat wire form of an asset: a type code plus every field any kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAsset {
    pub asset_type: u8,
    pub token: Address,
    pub amount: U256,
    pub token_id: U256,
}

impl TryFrom<RawAsset> for Asset {
    type Error = DotcError;

    fn try_from(raw: RawAsset) -> Result<Self> {
        let asset = match raw.asset_type {
            constants::ASSET_TYPE_ERC20 => Self::erc20(raw.token, raw.amount),
            constants::ASSET_TYPE_NFT_UNIQUE => {
                if raw.amount.is_zero() {
                    return Err(DotcError::AssetAmountZero);
                }
                if raw.amount > U256::one() {
                    return Err(DotcError::NftAmountExceedsOne(raw.amount));
                }
                Self::nft_unique(raw.token, raw.token_id)
            }
            constants::ASSET_TYPE_NFT_FUNGIBLE => {
                Self::nft_fungible(raw.token, raw.token_id, raw.amount)
            }
            other => return Err(DotcError::AssetTypeUndefined(other)),
        };
        asset.validate()?;
        Ok(asset)
    }
}

impl From<Asset> for RawAsset {
    fn from(asset: Asset) -> Self {
        Self {
            asset_type: asset.kind().code(),
            token: asset.token(),
            amount: asset.amount(),
            token_id: asset.token_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Address {
        Address::from_low_u64(0x20)
    }

    fn raw(asset_type: u8, amount: u64) -> RawAsset {
        RawAsset {
            asset_type,
            token: token(),
            amount: U256::from(amount),
            token_id: U256::from(9),
        }
    }

    #[test]
    fn erc20_has_no_token_id() {
        let a = Asset::erc20(token(), U256::from(500));
        assert_eq!(a.token_id(), U256::zero());
        assert_eq!(a.amount(), U256::from(500));
        assert!(a.is_fungible());
        assert_eq!(a.kind(), AssetKind::Erc20);
    }

    #[test]
    fn unique_nft_amount_is_one() {
        let a = Asset::nft_unique(token(), U256::from(3));
        assert_eq!(a.amount(), U256::one());
        assert!(!a.is_fungible());
        assert_eq!(a.key().token_id, U256::from(3));
    }

    #[test]
    fn validate_rejects_zero_address() {
        let a = Asset::erc20(Address::ZERO, U256::from(1));
        assert_eq!(a.validate(), Err(DotcError::AssetAddressZero));
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let a = Asset::nft_fungible(token(), U256::one(), U256::zero());
        assert_eq!(a.validate(), Err(DotcError::AssetAmountZero));
    }

    #[test]
    fn raw_undefined_type_rejected() {
        let err = Asset::try_from(raw(0, 1)).unwrap_err();
        assert_eq!(err, DotcError::AssetTypeUndefined(0));
        let err = Asset::try_from(raw(4, 1)).unwrap_err();
        assert_eq!(err, DotcError::AssetTypeUndefined(4));
    }

    #[test]
    fn raw_unique_nft_amount_checked() {
        let err = Asset::try_from(raw(constants::ASSET_TYPE_NFT_UNIQUE, 2)).unwrap_err();
        assert_eq!(err, DotcError::NftAmountExceedsOne(U256::from(2)));

        let ok = Asset::try_from(raw(constants::ASSET_TYPE_NFT_UNIQUE, 1)).unwrap();
        assert_eq!(ok, Asset::nft_unique(token(), U256::from(9)));
    }

    #[test]
    fn raw_erc20_ignores_token_id() {
        let a = Asset::try_from(raw(constants::ASSET_TYPE_ERC20, 77)).unwrap();
        assert_eq!(a, Asset::erc20(token(), U256::from(77)));
        assert_eq!(RawAsset::from(a).token_id, U256::zero());
    }

    #[test]
    fn with_amount_keeps_identity() {
        let a = Asset::nft_fungible(token(), U256::from(5), U256::from(10));
        let b = a.with_amount(U256::from(4)).unwrap();
        assert_eq!(b.key(), a.key());
        assert_eq!(b.amount(), U256::from(4));

        let nft = Asset::nft_unique(token(), U256::from(5));
        assert!(nft.with_amount(U256::from(2)).is_err());
        assert_eq!(nft.with_amount(U256::one()).unwrap(), nft);
    }

    #[test]
    fn asset_serde_is_tagged() {
        let a = Asset::erc20(token(), U256::from(1));
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"kind\":\"erc20\""), "Got: {json}");
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
