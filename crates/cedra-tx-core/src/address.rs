//! Account addresses.
//!
//! An address is 32 bytes. Addresses are content-addressed: an account's
//! address is `SHA3-256(public_key || scheme)`, and resource accounts derive
//! theirs from a creator address and a seed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::Sha3Hash;
use crate::error::{CoreError, Result};

/// Address length in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Scheme byte appended to an Ed25519 public key when deriving its address.
pub const ED25519_SCHEME: u8 = 0x00;

/// Scheme byte appended when deriving a resource account address.
pub const DERIVE_RESOURCE_ACCOUNT_SCHEME: u8 = 0xff;

const HEX_PREFIX: &str = "0x";

/// A 32-byte on-chain account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(pub [u8; ADDRESS_LENGTH]);

impl AccountAddress {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// `0x1`, home of the framework modules.
    pub const ONE: Self = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        Self(bytes)
    };

    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build from a slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidAddressLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parse a hex address, with or without `0x`.
    ///
    /// Short values are left-padded with zeros (`0x1` is `0x00..01`), and an
    /// odd number of digits is accepted. Values longer than 32 bytes are
    /// rejected, never truncated.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix(HEX_PREFIX).unwrap_or(s);
        let decoded = if digits.len() % 2 == 1 {
            hex::decode(format!("0{}", digits))
        } else {
            hex::decode(digits)
        }
        .map_err(|e| CoreError::InvalidAddressEncoding(format!("{}: {}", s, e)))?;

        if decoded.len() > ADDRESS_LENGTH {
            return Err(CoreError::AddressTooLong(decoded.len()));
        }

        let mut arr = [0u8; ADDRESS_LENGTH];
        arr[ADDRESS_LENGTH - decoded.len()..].copy_from_slice(&decoded);
        Ok(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex, no prefix, always 64 digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEX_PREFIX, self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

/// Derive a resource account address from a creator address and a seed.
///
/// `address = SHA3-256(creator || seed || 0xFF)`. `creator` must be exactly
/// 32 bytes.
pub fn derive_resource_address(creator: &[u8], seed: &[u8]) -> Result<AccountAddress> {
    if creator.len() != ADDRESS_LENGTH {
        return Err(CoreError::InvalidAddressLength(creator.len()));
    }
    let hash = Sha3Hash::hash_parts(&[creator, seed, &[DERIVE_RESOURCE_ACCOUNT_SCHEME]]);
    Ok(AccountAddress(hash.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_address_left_pads() {
        let addr = AccountAddress::from_hex("0x1").unwrap();
        assert_eq!(addr, AccountAddress::ONE);

        let twenty = "0x".to_string() + &"ab".repeat(20);
        let addr = AccountAddress::from_hex(&twenty).unwrap();
        assert_eq!(&addr.0[..12], &[0u8; 12]);
        assert_eq!(&addr.0[12..], &[0xab; 20]);
    }

    #[test]
    fn test_parse_full_address_without_prefix() {
        let hex = "c745ffa4f97fa9739fae0cb173996f70bb8e4b0310fa781ccca2f7dc13f7db06";
        let addr = AccountAddress::from_hex(hex).unwrap();
        assert_eq!(addr.to_hex(), hex);
        assert_eq!(addr.to_string(), format!("0x{}", hex));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let hex = "11".repeat(33);
        assert!(matches!(
            AccountAddress::from_hex(&hex),
            Err(CoreError::AddressTooLong(33))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        assert!(matches!(
            AccountAddress::from_hex("0xzz"),
            Err(CoreError::InvalidAddressEncoding(_))
        ));
    }

    #[test]
    fn test_from_slice_requires_32_bytes() {
        assert!(AccountAddress::from_slice(&[1u8; 32]).is_ok());
        assert!(matches!(
            AccountAddress::from_slice(&[1u8; 31]),
            Err(CoreError::InvalidAddressLength(31))
        ));
    }

    #[test]
    fn test_resource_address_known_vector() {
        let addr = derive_resource_address(AccountAddress::ONE.as_bytes(), b"seed").unwrap();
        assert_eq!(
            addr.to_hex(),
            "f38401f1afe8001e6403d419628d8190fe67f0442d24d106d2592946d205aba4"
        );

        let empty = derive_resource_address(AccountAddress::ONE.as_bytes(), b"").unwrap();
        assert_eq!(
            empty.to_hex(),
            "914ed009b2a4325e1d4c6f167a52e9d49e7e9b8aa82c8af2ab43ddc260c50c7f"
        );
    }

    #[test]
    fn test_resource_address_rejects_short_creator() {
        assert!(matches!(
            derive_resource_address(&[0u8; 20], b"seed"),
            Err(CoreError::InvalidAddressLength(20))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        let addr = AccountAddress::from_bytes([0x5a; 32]);
        let parsed: AccountAddress = addr.to_string().parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let addr = AccountAddress::from_bytes([0x07; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
