//! Identifiers used throughout OpenDOTC.
//!
//! Participants, tokens, price sources, and gatekeepers are all named by a
//! 20-byte [`Address`]. Offers are numbered by a monotonic [`OfferId`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::DotcError;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account / contract address, rendered as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address. Never a valid participant or token.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Build an address whose low 8 bytes hold `n` (big-endian).
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Generate a random address (test-only).
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = DotcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| DotcError::InvalidAddress {
            reason: e.to_string(),
        })?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| DotcError::InvalidAddress {
                reason: format!("expected 20 bytes, got {}", v.len()),
            })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = DotcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// OfferId
// ---------------------------------------------------------------------------

/// Sequential offer identifier. The ledger assigns ids starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl OfferId {
    /// The id that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_roundtrip() {
        let addr = Address::from_low_u64(0xdead_beef);
        let text = addr.to_string();
        assert_eq!(text, "0x00000000000000000000000000000000deadbeef");
        assert_eq!(text.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn address_parse_without_prefix() {
        let addr: Address = "00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(addr, Address::from_low_u64(0xff));
    }

    #[test]
    fn address_parse_rejects_wrong_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert!(matches!(err, DotcError::InvalidAddress { .. }));
    }

    #[test]
    fn zero_address_detection() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
        assert!(!Address::random().is_zero());
    }

    #[test]
    fn address_serde_as_hex_string() {
        let addr = Address::from_low_u64(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn offer_id_is_sequential() {
        let id = OfferId(41);
        assert_eq!(id.next(), OfferId(42));
        assert_eq!(id.to_string(), "41");
    }
}
