//! Transaction authenticators.

use crate::canonical::Encoder;
use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::error::Result;

/// `TransactionAuthenticator` variant for a single Ed25519 signer.
pub const ED25519_AUTHENTICATOR_VARIANT: u64 = 0;

/// Proof that the sender authorised a transaction: a public key and a
/// signature, tagged with the signing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticator {
    variant: u64,
    public_key: Ed25519PublicKey,
    signature: Ed25519Signature,
}

impl Authenticator {
    /// An Ed25519 authenticator.
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self {
            variant: ED25519_AUTHENTICATOR_VARIANT,
            public_key,
            signature,
        }
    }

    pub fn variant(&self) -> u64 {
        self.variant
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    /// Check the signature against `message`.
    pub fn verify(&self, message: &[u8]) -> Result<()> {
        self.public_key.verify(message, &self.signature)
    }

    /// Canonical encoding: variant, length-prefixed public key,
    /// length-prefixed signature.
    pub fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(1 + 1 + 32 + 1 + 64);
        enc.write_variant(self.variant)
            .write_bytes(self.public_key.as_bytes())
            .write_bytes(self.signature.as_bytes());
        enc.into_bytes()
    }
}
