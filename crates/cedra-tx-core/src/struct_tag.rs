//! Struct tags: fully-qualified on-chain type names (`address::module::name`).

use std::fmt;
use std::str::FromStr;

use crate::address::AccountAddress;
use crate::canonical::Encoder;
use crate::error::{CoreError, Result};

/// `TypeTag` variant for a struct type.
pub const STRUCT_TAG_VARIANT: u64 = 7;

const SEPARATOR: &str = "::";

/// Fully-qualified struct type name.
///
/// Generic type parameters are not supported; they always encode as an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
}

impl StructTag {
    pub fn new(address: AccountAddress, module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address,
            module: module.into(),
            name: name.into(),
        }
    }

    /// `0x1::cedra_coin::CedraCoin`, the native coin and default fee asset.
    pub fn cedra_coin() -> Self {
        Self::new(AccountAddress::ONE, "cedra_coin", "CedraCoin")
    }

    /// Parse `"<hex-address>::<module>::<name>"`.
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.split(SEPARATOR).collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(CoreError::MalformedTypeTag(format!(
                "expected address::module::name, got {:?}",
                tag
            )));
        };
        if module.is_empty() || name.is_empty() {
            return Err(CoreError::MalformedTypeTag(format!(
                "empty module or name in {:?}",
                tag
            )));
        }

        Ok(Self::new(AccountAddress::from_hex(address)?, *module, *name))
    }

    /// Canonical encoding as a `TypeTag::Struct`.
    pub fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(
            1 + 32 + self.module.len() + self.name.len() + 4,
        );
        self.encode_to(&mut enc);
        enc.into_bytes()
    }

    pub(crate) fn encode_to(&self, enc: &mut Encoder) {
        enc.write_variant(STRUCT_TAG_VARIANT)
            .write_raw(self.address.as_bytes())
            .write_str(&self.module)
            .write_str(&self.name)
            // type arguments
            .write_seq_len(0);
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

impl FromStr for StructTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
