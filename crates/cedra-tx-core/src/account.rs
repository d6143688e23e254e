//! Accounts: an Ed25519 signing key and the address derived from it.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use std::fmt;

use crate::address::{AccountAddress, ED25519_SCHEME};
use crate::crypto::{Ed25519PublicKey, Ed25519Signature, Sha3Hash};
use crate::error::{CoreError, Result};

/// Scheme prefix accepted (and emitted) on hex-encoded private keys.
pub const PRIVATE_KEY_PREFIX: &str = "ed25519-priv-";

/// Ed25519 seed length in bytes.
pub const SEED_LENGTH: usize = 32;

/// A signing account.
///
/// The address is derived once at construction and never changes. The
/// private key is only used through [`Account::sign`].
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    public_key: Ed25519PublicKey,
    address: AccountAddress,
}

impl Account {
    /// Generate a new random account.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self::from_signing_key(signing_key)
    }

    /// Create from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Parse a hex private key seed.
    ///
    /// Accepts an optional `ed25519-priv-` scheme prefix followed by an
    /// optional `0x` prefix, e.g. `ed25519-priv-0x1b54...`.
    pub fn from_private_key_hex(key: &str) -> Result<Self> {
        let key = key.strip_prefix(PRIVATE_KEY_PREFIX).unwrap_or(key);
        let key = key.strip_prefix("0x").unwrap_or(key);

        let bytes = hex::decode(key).map_err(|e| CoreError::InvalidKeyEncoding(e.to_string()))?;
        let seed: [u8; SEED_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            CoreError::InvalidKeyEncoding(format!(
                "expected {} byte seed, got {}",
                SEED_LENGTH,
                bytes.len()
            ))
        })?;

        let signing_key = SigningKey::from_bytes(&seed);

        // Checked derivation path for parsed keys; unreachable with dalek 2.x
        // but it is the only source of KeyDerivationFailure.
        let pk_bytes = signing_key.verifying_key().to_bytes();
        VerifyingKey::from_bytes(&pk_bytes).map_err(|_| CoreError::KeyDerivationFailure)?;

        Ok(Self::from_signing_key(signing_key))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = Ed25519PublicKey(signing_key.verifying_key().to_bytes());
        let address = AccountAddress(
            Sha3Hash::hash_parts(&[public_key.as_bytes(), &[ED25519_SCHEME]]).0,
        );
        Self {
            signing_key,
            public_key,
            address,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.public_key
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Export the private key in the same format [`Account::from_private_key_hex`] accepts.
    pub fn private_key_hex(&self) -> String {
        format!(
            "{}0x{}",
            PRIVATE_KEY_PREFIX,
            hex::encode(self.signing_key.to_bytes())
        )
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.address)
    }
}
