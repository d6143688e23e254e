//! Error types for the Cedra transaction core.

use thiserror::Error;

/// Errors raised while encoding, parsing, or signing transactions.
///
/// Every variant describes either malformed caller input or a violated
/// encoding invariant. None of them are retryable.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value does not fit the fixed width it was asked to encode into.
    #[error("encoding constraint violated: {0}")]
    EncodingConstraint(String),

    #[error("invalid private key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("failed to derive public key from private key")]
    KeyDerivationFailure,

    #[error("invalid address encoding: {0}")]
    InvalidAddressEncoding(String),

    #[error("address too long: {0} bytes (max 32)")]
    AddressTooLong(usize),

    #[error("invalid address length: expected 32 bytes, got {0}")]
    InvalidAddressLength(usize),

    #[error("malformed type tag: {0}")]
    MalformedTypeTag(String),

    #[error("signer {signer} is not the transaction sender {sender}")]
    SenderMismatch { sender: String, signer: String },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("decoding error: {0}")]
    Decoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
